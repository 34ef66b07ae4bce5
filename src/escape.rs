//! The escape-time evaluator: how many times can a point be squared
//! and shifted before its orbit leaves the circle of radius two?
//!
//! Most of the interior of the set is made of orbits that settle into
//! a short cycle.  Iterating those all the way to the cap is wasted
//! work, so every `periodicity_cutoff` steps the evaluator snapshots
//! the orbit and bails out as soon as the orbit returns to within
//! `PERIODICITY_EPSILON` of the snapshot.

use num::Complex;

use crate::errors::{MandelbrotError, Result};

/// Default escape cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Default number of steps between periodicity snapshots.
pub const DEFAULT_PERIODICITY_CUTOFF: u32 = 20;

/// How close, per component, the orbit must come back to the snapshot
/// to be called periodic.  Changing it changes rendered output.
pub const PERIODICITY_EPSILON: f64 = 1.0e-7;

/// The per-pass parameters of the escape-time iteration.  Fixed for
/// the duration of a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MandelbrotParams {
    max_iterations: u32,
    periodicity_cutoff: u32,
}

impl MandelbrotParams {
    /// Both the cap and the cutoff must be positive.
    pub fn new(max_iterations: u32, periodicity_cutoff: u32) -> Result<Self> {
        if max_iterations == 0 {
            return Err(MandelbrotError::invalid("max_iterations must be positive"));
        }
        if periodicity_cutoff == 0 {
            return Err(MandelbrotError::invalid(
                "periodicity_cutoff must be positive",
            ));
        }
        Ok(MandelbrotParams {
            max_iterations,
            periodicity_cutoff,
        })
    }

    /// The escape cap, and the value reported for interior points.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Steps between periodicity snapshots.
    pub fn periodicity_cutoff(&self) -> u32 {
        self.periodicity_cutoff
    }
}

impl Default for MandelbrotParams {
    fn default() -> Self {
        MandelbrotParams {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            periodicity_cutoff: DEFAULT_PERIODICITY_CUTOFF,
        }
    }
}

#[inline]
fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < PERIODICITY_EPSILON
}

/// Returns the iteration at which the orbit of `point` under
/// `z <- z*z + point` left the radius-two circle, or
/// `max_iterations` if it never did or was found to be periodic.
/// The result always lies in `0..=max_iterations`.
pub fn escape_time(point: Complex<f64>, params: &MandelbrotParams) -> u32 {
    let (x0, y0) = (point.re, point.im);
    let max_iterations = params.max_iterations;

    let (mut x, mut y) = (0.0_f64, 0.0_f64);
    let (mut x2, mut y2) = (0.0_f64, 0.0_f64);
    let (mut x_old, mut y_old) = (0.0_f64, 0.0_f64);
    let mut period = 0;
    let mut iterations = 0;

    while x2 + y2 <= 4.0 && iterations < max_iterations {
        y = 2.0 * x * y + y0;
        x = x2 - y2 + x0;
        x2 = x * x;
        y2 = y * y;

        iterations += 1;

        if approx(x, x_old) && approx(y, y_old) {
            iterations = max_iterations;
            break;
        }

        period += 1;
        if period > params.periodicity_cutoff {
            period = 0;
            x_old = x;
            y_old = y;
        }
    }

    iterations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(max: u32) -> MandelbrotParams {
        MandelbrotParams::new(max, DEFAULT_PERIODICITY_CUTOFF).unwrap()
    }

    #[test]
    fn params_reject_zero() {
        assert!(MandelbrotParams::new(0, 20).is_err());
        assert!(MandelbrotParams::new(100, 0).is_err());
    }

    #[test]
    fn origin_is_a_fixed_point() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), &params(1000)), 1000);
    }

    #[test]
    fn far_points_escape_immediately() {
        let n = escape_time(Complex::new(2.0, 2.0), &params(1000));
        assert!(n >= 1 && n <= 2, "escaped after {}", n);
    }

    #[test]
    fn period_two_bulb_is_interior() {
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), &params(500)), 500);
    }

    #[test]
    fn main_cardioid_is_interior() {
        assert_eq!(escape_time(Complex::new(-0.1, 0.1), &params(500)), 500);
    }

    #[test]
    fn just_outside_the_set_escapes_late() {
        // 0.26 lies just past the cusp at 0.25, so the orbit lingers.
        let n = escape_time(Complex::new(0.26, 0.0), &params(1000));
        assert!(n > 10 && n < 1000, "escaped after {}", n);
    }

    /// Straight `z*z + c` with no periodicity shortcut.
    fn plain_escape(point: Complex<f64>, max_iterations: u32) -> u32 {
        let mut z = Complex::new(0.0_f64, 0.0_f64);
        let mut n = 0;
        while z.norm_sqr() <= 4.0 && n < max_iterations {
            z = z * z + point;
            n += 1;
        }
        n
    }

    #[test]
    fn escaping_points_match_the_plain_iteration() {
        let points = [
            Complex::new(0.26, 0.0),
            Complex::new(-0.75, 0.1),
            Complex::new(0.0, 1.5),
            Complex::new(-1.8, 0.1),
            Complex::new(0.5, 0.5),
            Complex::new(-0.1, 0.9),
            Complex::new(1.0, 0.0),
            Complex::new(2.0, 2.0),
        ];
        for &point in &points {
            let n = escape_time(point, &params(1000));
            assert!(n < 1000, "{} did not escape", point);
            assert_eq!(n, plain_escape(point, 1000), "at {}", point);
        }
    }

    #[test]
    fn counts_include_the_escaping_step() {
        // 0 -> 1 -> 2 -> 5: |z| first exceeds two on the third step.
        assert_eq!(escape_time(Complex::new(1.0, 0.0), &params(1000)), 3);
        assert_eq!(escape_time(Complex::new(2.0, 2.0), &params(1000)), 1);
    }

    #[test]
    fn cap_is_respected() {
        assert_eq!(escape_time(Complex::new(-0.75, 0.0), &params(7)), 7);
    }
}
