// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The viewport: which rectangle of the complex plane is on screen,
//! and how pixel-space gestures move it.
//!
//! Pixel deltas use screen convention, `+x` to the right and `+y`
//! downward.  Since the top row of the grid samples the largest
//! imaginary coordinate, a downward pixel delta is a decrease along
//! the imaginary axis.
//!
//! Every operation computes a complete new [`Bounds`] and replaces the
//! old one in a single assignment; a rejected operation leaves the
//! viewport exactly as it was.

use num::Complex;

use crate::errors::{MandelbrotError, Result};
use crate::planes::{Bounds, Dimensions};

/// Complex-plane units moved per keyboard tick, before any zooming.
pub const DEFAULT_STEP: f64 = 0.25;

/// Complex-plane units per pixel for a viewport built from a scale.
pub const DEFAULT_SCALE: f64 = 1.0 / 400.0;

/// A rectangle of the complex plane drawn onto a grid of pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    bounds: Bounds,
    dimensions: Dimensions,
    step: f64,
    home: Bounds,
}

impl Viewport {
    /// The classic framing of the whole set on a grid of the given size.
    pub fn new(dimensions: Dimensions) -> Self {
        Viewport::with_bounds(Bounds::default(), dimensions)
    }

    /// A viewport showing `bounds`.  [`reset`](Viewport::reset)
    /// returns here.
    pub fn with_bounds(bounds: Bounds, dimensions: Dimensions) -> Self {
        Viewport {
            bounds,
            dimensions,
            step: DEFAULT_STEP,
            home: bounds,
        }
    }

    /// A viewport centered on `center` where every pixel covers `scale`
    /// units along both axes.
    pub fn from_scale(center: Complex<f64>, scale: f64, dimensions: Dimensions) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(MandelbrotError::invalid("scale must be positive"));
        }
        let bounds = Bounds::around(
            center,
            scale * dimensions.width() as f64,
            scale * dimensions.height() as f64,
        )?;
        Ok(Viewport::with_bounds(bounds, dimensions))
    }

    /// The rectangle currently on screen.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The grid the rectangle is drawn onto.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Complex-plane distance covered by one keyboard tick.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Complex-plane size of one pixel, (real, imaginary).
    pub fn scale(&self) -> (f64, f64) {
        self.bounds.pixel_size(self.dimensions)
    }

    /// Moves the window `dx` pixels right and `dy` pixels down.  The
    /// rectangle keeps its size, and `pan(-dx, -dy)` undoes it.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<&mut Self> {
        if !(dx.is_finite() && dy.is_finite()) {
            return Err(MandelbrotError::invalid("pan distance must be finite"));
        }
        if dx == 0.0 && dy == 0.0 {
            return Ok(self);
        }
        let (xd, yd) = self.scale();
        self.bounds = self.bounds.translated(Complex::new(dx * xd, -dy * yd))?;
        Ok(self)
    }

    /// Scales the window about its center: below one zooms in, above
    /// one zooms out.  The keyboard step scales along with it.
    pub fn zoom(&mut self, factor: f64) -> Result<&mut Self> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(MandelbrotError::invalid(format!(
                "zoom factor must be positive, got {}",
                factor
            )));
        }
        if factor == 1.0 {
            return Ok(self);
        }
        self.bounds = self.bounds.scaled(factor, factor)?;
        self.step *= factor;
        Ok(self)
    }

    /// Back to the starting framing and keyboard step.
    pub fn reset(&mut self) -> &mut Self {
        self.bounds = self.home;
        self.step = DEFAULT_STEP;
        self
    }

    /// Follows a mouse drag from `(px0, py0)` to `(px1, py1)`.  The
    /// content moves with the pointer, so the window moves the other
    /// way.
    pub fn drag_to(&mut self, px0: i32, py0: i32, px1: i32, py1: i32) -> Result<&mut Self> {
        let dx = f64::from(px1) - f64::from(px0);
        let dy = f64::from(py1) - f64::from(py0);
        self.pan(-dx, -dy)
    }

    /// Moves the window `ticks` keyboard steps right (left when
    /// negative).
    pub fn shift_horizontal(&mut self, ticks: i32) -> Result<&mut Self> {
        if ticks == 0 {
            return Ok(self);
        }
        let shift = Complex::new(self.step * f64::from(ticks), 0.0);
        self.bounds = self.bounds.translated(shift)?;
        Ok(self)
    }

    /// Moves the window `ticks` keyboard steps up (down when negative).
    pub fn shift_vertical(&mut self, ticks: i32) -> Result<&mut Self> {
        if ticks == 0 {
            return Ok(self);
        }
        let shift = Complex::new(0.0, self.step * f64::from(ticks));
        self.bounds = self.bounds.translated(shift)?;
        Ok(self)
    }

    /// Changes the pixel grid.  The rectangle grows or shrinks about its
    /// center in proportion, so a pixel covers the same area of the
    /// plane as before.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<&mut Self> {
        let dimensions = Dimensions::new(width, height)?;
        if dimensions == self.dimensions {
            return Ok(self);
        }
        let xfactor = width as f64 / self.dimensions.width() as f64;
        let yfactor = height as f64 / self.dimensions.height() as f64;
        self.bounds = self.bounds.scaled(xfactor, yfactor)?;
        self.dimensions = dimensions;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn close(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON
    }

    fn viewport() -> Viewport {
        Viewport::new(Dimensions::new(700, 400).unwrap())
    }

    #[test]
    fn pan_moves_by_whole_pixels() {
        let mut v = viewport();
        let (xd, yd) = v.scale();
        v.pan(10.0, 0.0).unwrap();
        assert!((v.bounds().x_min() - (-2.5 + 10.0 * xd)).abs() < EPSILON);
        v.pan(-10.0, 4.0).unwrap();
        assert!((v.bounds().y_max() - (1.0 - 4.0 * yd)).abs() < EPSILON);
    }

    #[test]
    fn pan_keeps_the_size() {
        let mut v = viewport();
        v.pan(33.0, -17.0).unwrap();
        assert!((v.bounds().xrange() - 3.5).abs() < EPSILON);
        assert!((v.bounds().yrange() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn pan_rejects_nonsense() {
        let mut v = viewport();
        assert!(v.pan(std::f64::NAN, 0.0).is_err());
        assert_eq!(v, viewport());
    }

    #[test]
    fn zoom_scales_the_step() {
        let mut v = viewport();
        v.zoom(0.5).unwrap();
        assert_eq!(v.step(), DEFAULT_STEP * 0.5);
        assert!((v.bounds().xrange() - 1.75).abs() < EPSILON);
        assert!(close(v.bounds().center(), Complex::new(-0.75, 0.0)));
    }

    #[test]
    fn zoom_rejects_non_positive_factors() {
        let mut v = viewport();
        assert!(v.zoom(0.0).is_err());
        assert!(v.zoom(-2.0).is_err());
        assert_eq!(v, viewport());
    }

    #[test]
    fn reset_restores_framing_and_step() {
        let mut v = viewport();
        v.zoom(0.25).unwrap().pan(40.0, 40.0).unwrap();
        v.reset();
        assert_eq!(v.bounds(), Bounds::default());
        assert_eq!(v.step(), DEFAULT_STEP);
    }

    #[test]
    fn drag_right_moves_the_window_left() {
        let mut v = viewport();
        v.drag_to(100, 100, 150, 100).unwrap();
        assert!(v.bounds().x_min() < -2.5);
        assert_eq!(v.bounds().y_min(), -1.0);
    }

    #[test]
    fn drag_down_moves_the_window_up() {
        let mut v = viewport();
        v.drag_to(100, 100, 100, 180).unwrap();
        assert!(v.bounds().y_max() > 1.0);
    }

    #[test]
    fn shifts_follow_the_step() {
        let mut v = viewport();
        v.shift_horizontal(2).unwrap();
        assert!((v.bounds().x_min() - (-2.0)).abs() < EPSILON);
        v.shift_vertical(-1).unwrap();
        assert!((v.bounds().y_min() - (-1.25)).abs() < EPSILON);
    }

    #[test]
    fn resize_keeps_pixel_scale() {
        let mut v = viewport();
        let before = v.scale();
        v.resize(350, 800).unwrap();
        let after = v.scale();
        assert!((before.0 - after.0).abs() < EPSILON);
        assert!((before.1 - after.1).abs() < EPSILON);
    }

    #[test]
    fn resize_rejects_empty_grids() {
        let mut v = viewport();
        assert!(v.resize(0, 10).is_err());
        assert_eq!(v, viewport());
    }

    #[test]
    fn from_scale_centers_the_window() {
        let dims = Dimensions::new(800, 400).unwrap();
        let v = Viewport::from_scale(Complex::new(0.0, 0.0), DEFAULT_SCALE, dims).unwrap();
        assert!(close(v.bounds().leftlower(), Complex::new(-1.0, -0.5)));
        assert!(close(v.bounds().rightupper(), Complex::new(1.0, 0.5)));
        assert!(Viewport::from_scale(Complex::new(0.0, 0.0), 0.0, dims).is_err());
    }
}
