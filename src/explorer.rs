// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Ties a viewport, a grid engine and a palette together.  Every
//! gesture that changes what is on screen recomputes the grid,
//! colors it, and publishes the result as a new [`Frame`].
//!
//! The published frame sits behind an `Arc` and is replaced with a
//! single assignment once a pass has finished, so a reader holding a
//! frame always sees one whole pass.  A gesture whose pass fails leaves
//! both the viewport and the published frame as they were.

use log::{info, warn};
use std::sync::Arc;

use crate::config::Config;
use crate::errors::Result;
use crate::escape::MandelbrotParams;
use crate::grid::{GridEngine, IterationGrid};
use crate::palette::{ColorGrid, Palette};
use crate::planes::Bounds;
use crate::viewport::Viewport;

/// One completed pass: the rectangle it covered, the parameters it
/// ran with, its escape counts and their colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    bounds: Bounds,
    params: MandelbrotParams,
    iterations: IterationGrid,
    colors: ColorGrid,
}

impl Frame {
    /// The rectangle this frame shows.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The parameters the pass ran with.
    pub fn params(&self) -> MandelbrotParams {
        self.params
    }

    /// Escape counts, one per pixel.
    pub fn iterations(&self) -> &IterationGrid {
        &self.iterations
    }

    /// Colors, one per pixel.
    pub fn colors(&self) -> &ColorGrid {
        &self.colors
    }
}

/// An interactive session over the set.
pub struct Explorer {
    viewport: Viewport,
    engine: GridEngine,
    palette: Palette,
    frame: Arc<Frame>,
}

impl Explorer {
    /// Validates `config` and computes the first frame.
    pub fn new(config: Config) -> Result<Self> {
        let valid = config.validate()?;
        let viewport = Viewport::with_bounds(config.bounds, valid.dimensions);
        let engine = GridEngine::new(valid.params, config.worker_count);
        let frame = render(&viewport, &engine, &valid.palette)?;
        Ok(Explorer {
            viewport,
            engine,
            palette: valid.palette,
            frame: Arc::new(frame),
        })
    }

    /// The most recently published frame.  It stays valid for as long
    /// as the caller holds it, whatever happens to the explorer.
    pub fn frame(&self) -> Arc<Frame> {
        Arc::clone(&self.frame)
    }

    /// The current viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The engine passes run on.
    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    /// See [`Viewport::pan`].  Returns whether a new frame was published.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<bool> {
        self.apply(|v| v.pan(dx, dy).map(drop))
    }

    /// See [`Viewport::zoom`].
    pub fn zoom(&mut self, factor: f64) -> Result<bool> {
        self.apply(|v| v.zoom(factor).map(drop))
    }

    /// See [`Viewport::reset`].
    pub fn reset(&mut self) -> Result<bool> {
        self.apply(|v| {
            v.reset();
            Ok(())
        })
    }

    /// See [`Viewport::drag_to`].
    pub fn drag_to(&mut self, px0: i32, py0: i32, px1: i32, py1: i32) -> Result<bool> {
        self.apply(|v| v.drag_to(px0, py0, px1, py1).map(drop))
    }

    /// See [`Viewport::shift_horizontal`].
    pub fn shift_horizontal(&mut self, ticks: i32) -> Result<bool> {
        self.apply(|v| v.shift_horizontal(ticks).map(drop))
    }

    /// See [`Viewport::shift_vertical`].
    pub fn shift_vertical(&mut self, ticks: i32) -> Result<bool> {
        self.apply(|v| v.shift_vertical(ticks).map(drop))
    }

    /// See [`Viewport::resize`].
    pub fn resize(&mut self, width: usize, height: usize) -> Result<bool> {
        self.apply(|v| v.resize(width, height).map(drop))
    }

    /// Changes the escape cap for subsequent passes and recomputes.
    pub fn set_max_iterations(&mut self, max_iterations: u32) -> Result<bool> {
        let cutoff = self.engine.params().periodicity_cutoff();
        self.reparameterize(MandelbrotParams::new(max_iterations, cutoff))
    }

    /// Changes the periodicity cutoff for subsequent passes and
    /// recomputes.
    pub fn set_periodicity_cutoff(&mut self, periodicity_cutoff: u32) -> Result<bool> {
        let max = self.engine.params().max_iterations();
        self.reparameterize(MandelbrotParams::new(max, periodicity_cutoff))
    }

    fn reparameterize(&mut self, params: Result<MandelbrotParams>) -> Result<bool> {
        let params = params.map_err(|e| {
            warn!("Rejected parameter change: {}", e);
            e
        })?;
        if params == self.engine.params() {
            return Ok(false);
        }
        let engine = self.engine.with_params(params);
        self.publish(render(&self.viewport, &engine, &self.palette)?);
        self.engine = engine;
        Ok(true)
    }

    fn apply<F>(&mut self, gesture: F) -> Result<bool>
    where
        F: FnOnce(&mut Viewport) -> Result<()>,
    {
        let mut next = self.viewport;
        if let Err(e) = gesture(&mut next) {
            warn!("Rejected viewport change: {}", e);
            return Err(e);
        }
        let changed = next.bounds() != self.viewport.bounds()
            || next.dimensions() != self.viewport.dimensions();
        if changed {
            self.publish(render(&next, &self.engine, &self.palette)?);
        }
        self.viewport = next;
        Ok(changed)
    }

    fn publish(&mut self, frame: Frame) {
        let dimensions = frame.iterations.dimensions();
        info!(
            "Publishing {}x{} frame over {:?}",
            dimensions.width(),
            dimensions.height(),
            frame.bounds
        );
        self.frame = Arc::new(frame);
    }
}

fn render(viewport: &Viewport, engine: &GridEngine, palette: &Palette) -> Result<Frame> {
    let bounds = viewport.bounds();
    let iterations = engine.compute(&bounds, viewport.dimensions())?;
    let colors = palette.colorize(&iterations);
    Ok(Frame {
        bounds,
        params: engine.params(),
        iterations,
        colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planes::Pixel;

    fn small() -> Explorer {
        Explorer::new(Config {
            width: 32,
            height: 20,
            max_iterations: 60,
            worker_count: 3,
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn first_frame_is_published_on_construction() {
        let explorer = small();
        let frame = explorer.frame();
        assert_eq!(frame.bounds(), Bounds::default());
        assert_eq!(frame.iterations().dimensions().width(), 32);
        assert_eq!(frame.colors().as_slice().len(), 32 * 20);
    }

    #[test]
    fn gestures_publish_new_frames() {
        let mut explorer = small();
        let before = explorer.frame();
        assert!(explorer.zoom(0.5).unwrap());
        let after = explorer.frame();
        assert_ne!(before.bounds(), after.bounds());
        // the old frame is untouched
        assert_eq!(before.bounds(), Bounds::default());
    }

    #[test]
    fn no_op_gestures_do_not_recompute() {
        let mut explorer = small();
        let before = explorer.frame();
        assert!(!explorer.drag_to(5, 5, 5, 5).unwrap());
        assert!(!explorer.zoom(1.0).unwrap());
        assert!(!explorer.pan(0.0, 0.0).unwrap());
        assert!(Arc::ptr_eq(&before, &explorer.frame()));
    }

    #[test]
    fn rejected_gestures_change_nothing() {
        let mut explorer = small();
        let viewport = *explorer.viewport();
        let frame = explorer.frame();
        assert!(explorer.zoom(-1.0).is_err());
        assert!(explorer.resize(0, 4).is_err());
        assert!(explorer.set_max_iterations(0).is_err());
        assert_eq!(*explorer.viewport(), viewport);
        assert!(Arc::ptr_eq(&frame, &explorer.frame()));
    }

    #[test]
    fn resize_replaces_the_grid() {
        let mut explorer = small();
        assert!(explorer.resize(40, 10).unwrap());
        let frame = explorer.frame();
        assert_eq!(frame.iterations().dimensions().width(), 40);
        assert_eq!(frame.iterations().dimensions().height(), 10);
        assert_eq!(frame.iterations().get(Pixel(39, 9)).is_some(), true);
    }

    #[test]
    fn parameter_changes_recompute() {
        let mut explorer = small();
        assert!(explorer.set_max_iterations(120).unwrap());
        assert_eq!(explorer.frame().params().max_iterations(), 120);
        assert!(!explorer.set_max_iterations(120).unwrap());
        assert!(explorer.set_periodicity_cutoff(5).unwrap());
        assert_eq!(explorer.frame().params().periodicity_cutoff(), 5);
    }

    #[test]
    fn reset_after_zoom_returns_home() {
        let mut explorer = small();
        explorer.zoom(0.3).unwrap();
        explorer.shift_horizontal(1).unwrap();
        assert!(explorer.reset().unwrap());
        assert_eq!(explorer.frame().bounds(), Bounds::default());
        assert_eq!(explorer.viewport().step(), crate::viewport::DEFAULT_STEP);
    }
}
