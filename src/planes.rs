//! Contains the two planes the engine works between: an integral
//! plane of pixels with its origin at the top-left corner, and a
//! rectangle on the complex plane described by its left-lower and
//! right-upper corners.  Maps pixels from one to the other.
use num::Complex;

use crate::errors::{MandelbrotError, Result};

/// Describes the x, y of a pixel on the integral plane.  `x` counts
/// columns from the left edge, `y` counts rows down from the top.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The width and height of the integral plane, in pixels.  Both are
/// always positive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

impl Dimensions {
    /// Rejects a plane with no columns or no rows.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MandelbrotError::invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Dimensions { width, height })
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The number of cells in the plane, or `None` if that number
    /// does not fit in memory's address space.
    pub fn cells(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

/// Describes the left-lower corner and right-upper corner of a
/// rectangle on the complex plane, treating the real part of each
/// value as the x-component and the imaginary part as the
/// y-component.  The width and height are always derived from the
/// corners.
///
/// A `Bounds` is a value: pans and zooms produce a new one rather than
/// editing an existing one in place.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    leftlower: Complex<f64>,
    rightupper: Complex<f64>,
}

/// The classic framing of the whole set.
pub const DEFAULT_LEFTLOWER: Complex<f64> = Complex { re: -2.5, im: -1.0 };
/// See [`DEFAULT_LEFTLOWER`].
pub const DEFAULT_RIGHTUPPER: Complex<f64> = Complex { re: 1.0, im: 1.0 };

impl Bounds {
    /// Takes two points describing the complex plane.  The first must
    /// lie strictly to the left of and below the second.
    pub fn new(leftlower: Complex<f64>, rightupper: Complex<f64>) -> Result<Bounds> {
        let finite = [leftlower.re, leftlower.im, rightupper.re, rightupper.im]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(MandelbrotError::invalid("bounds must be finite"));
        }
        if rightupper.re <= leftlower.re {
            return Err(MandelbrotError::invalid(
                "the left lower corner is not to the left of the right upper corner",
            ));
        }
        if rightupper.im <= leftlower.im {
            return Err(MandelbrotError::invalid(
                "the left lower corner is not lower than the right upper corner",
            ));
        }
        Ok(Bounds {
            leftlower,
            rightupper,
        })
    }

    /// Builds a rectangle of the given width and height around a center.
    pub fn around(center: Complex<f64>, xrange: f64, yrange: f64) -> Result<Bounds> {
        let half = Complex::new(xrange / 2.0, yrange / 2.0);
        Bounds::new(center - half, center + half)
    }

    /// Left-lower corner.
    pub fn leftlower(&self) -> Complex<f64> {
        self.leftlower
    }

    /// Right-upper corner.
    pub fn rightupper(&self) -> Complex<f64> {
        self.rightupper
    }

    /// Smallest real coordinate.
    pub fn x_min(&self) -> f64 {
        self.leftlower.re
    }

    /// Largest real coordinate.
    pub fn x_max(&self) -> f64 {
        self.rightupper.re
    }

    /// Smallest imaginary coordinate.
    pub fn y_min(&self) -> f64 {
        self.leftlower.im
    }

    /// Largest imaginary coordinate.
    pub fn y_max(&self) -> f64 {
        self.rightupper.im
    }

    /// Width of the rectangle along the real axis.
    pub fn xrange(&self) -> f64 {
        self.rightupper.re - self.leftlower.re
    }

    /// Height of the rectangle along the imaginary axis.
    pub fn yrange(&self) -> f64 {
        self.rightupper.im - self.leftlower.im
    }

    /// The midpoint of the rectangle.
    pub fn center(&self) -> Complex<f64> {
        Complex::new(
            self.leftlower.re + self.xrange() / 2.0,
            self.leftlower.im + self.yrange() / 2.0,
        )
    }

    /// The same rectangle moved by `shift`.
    pub fn translated(&self, shift: Complex<f64>) -> Result<Bounds> {
        Bounds::new(self.leftlower + shift, self.rightupper + shift)
    }

    /// The rectangle scaled about its own center, independently along
    /// each axis.
    pub fn scaled(&self, xfactor: f64, yfactor: f64) -> Result<Bounds> {
        Bounds::around(
            self.center(),
            self.xrange() * xfactor,
            self.yrange() * yfactor,
        )
    }

    /// The size of one pixel on the complex plane, as (real, imaginary)
    /// steps, when this rectangle is drawn onto `dimensions`.
    pub fn pixel_size(&self, dimensions: Dimensions) -> (f64, f64) {
        (
            self.xrange() / dimensions.width() as f64,
            self.yrange() / dimensions.height() as f64,
        )
    }

    /// Given a pixel on the integral plane, map it to the complex
    /// number it samples.  The top row samples the largest imaginary
    /// coordinate: rows grow downward while the imaginary axis grows
    /// upward.
    pub fn pixel_to_point(&self, dimensions: Dimensions, pixel: Pixel) -> Complex<f64> {
        let (xd, yd) = self.pixel_size(dimensions);
        Complex::new(
            self.leftlower.re + (pixel.0 as f64) * xd,
            self.rightupper.im - (pixel.1 as f64) * yd,
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            leftlower: DEFAULT_LEFTLOWER,
            rightupper: DEFAULT_RIGHTUPPER,
        }
    }
}
