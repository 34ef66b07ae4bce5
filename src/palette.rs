//! Maps escape counts to colors by cycling through a fixed, ordered
//! list.  Count `k` gets color `k mod len`; there is no smoothing or
//! interpolation.

use crate::errors::{MandelbrotError, Result};
use crate::grid::IterationGrid;
use crate::planes::Dimensions;

/// An 8-bit-per-channel RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Builds a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::new(r, g, b, 255)
    }
}

/// The sixteen-step brown-blue-gold cycle.
pub const DEFAULT_COLORS: [Color; 16] = [
    Color::rgb(66, 30, 15),
    Color::rgb(25, 7, 26),
    Color::rgb(9, 1, 47),
    Color::rgb(4, 4, 73),
    Color::rgb(0, 7, 100),
    Color::rgb(12, 44, 138),
    Color::rgb(24, 82, 177),
    Color::rgb(57, 125, 209),
    Color::rgb(134, 181, 229),
    Color::rgb(211, 236, 248),
    Color::rgb(241, 233, 191),
    Color::rgb(248, 201, 95),
    Color::rgb(255, 170, 0),
    Color::rgb(204, 128, 0),
    Color::rgb(153, 87, 0),
    Color::rgb(106, 52, 3),
];

/// Returns `palette[count mod palette.len()]`.
pub fn color_for(count: u32, palette: &[Color]) -> Result<Color> {
    if palette.is_empty() {
        return Err(MandelbrotError::invalid("palette must not be empty"));
    }
    Ok(palette[count as usize % palette.len()])
}

/// A non-empty, immutable list of colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Rejects an empty list.
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(MandelbrotError::invalid("palette must not be empty"));
        }
        Ok(Palette { colors })
    }

    /// The colors, in cycle order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of colors in one cycle.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color for one escape count.  Infallible because the palette
    /// is never empty.
    pub fn color_for(&self, count: u32) -> Color {
        self.colors[count as usize % self.colors.len()]
    }

    /// Colors every cell of a finished grid.
    pub fn colorize(&self, grid: &IterationGrid) -> ColorGrid {
        ColorGrid {
            dimensions: grid.dimensions(),
            pixels: grid.as_slice().iter().map(|&n| self.color_for(n)).collect(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

/// The colored counterpart of an [`IterationGrid`], same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorGrid {
    dimensions: Dimensions,
    pixels: Vec<Color>,
}

impl ColorGrid {
    /// The pixel dimensions of the grid.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// All colors, row-major.
    pub fn as_slice(&self) -> &[Color] {
        &self.pixels
    }

    /// Four bytes per pixel, R G B A, row-major; the layout a
    /// streaming texture in ABGR8888 expects on little-endian hosts.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for c in &self.pixels {
            bytes.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        bytes
    }

    /// Three bytes per pixel, alpha dropped.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for c in &self.pixels {
            bytes.extend_from_slice(&[c.r, c.g, c.b]);
        }
        bytes
    }
}
