//! Construction-time settings for an [`Explorer`](crate::Explorer).

use crate::errors::Result;
use crate::escape::{MandelbrotParams, DEFAULT_MAX_ITERATIONS, DEFAULT_PERIODICITY_CUTOFF};
use crate::palette::{Color, Palette, DEFAULT_COLORS};
use crate::planes::{Bounds, Dimensions};

/// Default grid width in pixels.
pub const DEFAULT_WIDTH: usize = 700;
/// Default grid height in pixels.
pub const DEFAULT_HEIGHT: usize = 400;

/// Everything needed to start exploring.  Plain data; nothing is
/// checked until [`Config::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Grid width in pixels.
    pub width: usize,
    /// Grid height in pixels.
    pub height: usize,
    /// Escape cap.
    pub max_iterations: u32,
    /// Steps between periodicity snapshots.
    pub periodicity_cutoff: u32,
    /// Colors cycled through by escape count.
    pub palette: Vec<Color>,
    /// Band workers per pass; zero or one computes on the calling thread.
    pub worker_count: usize,
    /// Starting framing, and where a reset returns to.
    pub bounds: Bounds,
}

/// The checked pieces of a [`Config`].
#[derive(Clone, Debug, PartialEq)]
pub struct Validated {
    /// Grid size.
    pub dimensions: Dimensions,
    /// Per-pass parameters.
    pub params: MandelbrotParams,
    /// Non-empty palette.
    pub palette: Palette,
}

impl Config {
    /// Checks every field, failing with `InvalidArgument` on the first
    /// one that cannot be used.
    pub fn validate(&self) -> Result<Validated> {
        Ok(Validated {
            dimensions: Dimensions::new(self.width, self.height)?,
            params: MandelbrotParams::new(self.max_iterations, self.periodicity_cutoff)?,
            palette: Palette::new(self.palette.clone())?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            periodicity_cutoff: DEFAULT_PERIODICITY_CUTOFF,
            palette: DEFAULT_COLORS.to_vec(),
            worker_count: num_cpus::get(),
            bounds: Bounds::default(),
        }
    }
}
