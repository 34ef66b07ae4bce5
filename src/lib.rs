#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot escape-time engine
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which the orbit of zero under `z <- z*z + c` stays bounded.
//! Points outside the set are colored by how quickly their orbit
//! leaves the circle of radius two; points inside are given the
//! iteration cap.
//!
//! This crate turns a rectangle of the complex plane into a grid of
//! those escape counts, optionally splitting the grid into row bands
//! computed on separate threads, and maps the counts onto a cycling
//! palette.  A [`Viewport`] translates pixel-space gestures (pans,
//! drags, zooms, resizes) into new rectangles, and an [`Explorer`]
//! recomputes and republishes a whole [`Frame`] after each one.  The
//! window, the event loop and the texture upload belong to the host.

extern crate crossbeam;
extern crate failure;
extern crate itertools;
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod config;
pub mod errors;
pub mod escape;
pub mod explorer;
pub mod grid;
pub mod palette;
pub mod parse;
pub mod planes;
pub mod viewport;

pub use config::Config;
pub use errors::{MandelbrotError, Result};
pub use escape::{escape_time, MandelbrotParams};
pub use explorer::{Explorer, Frame};
pub use grid::{band_ranges, GridEngine, IterationGrid};
pub use palette::{color_for, Color, ColorGrid, Palette};
pub use planes::{Bounds, Dimensions, Pixel};
pub use viewport::Viewport;
