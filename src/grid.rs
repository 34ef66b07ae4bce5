// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The iteration grid and the engine that fills it.
//!
//! The grid is a single flat, row-major buffer of escape counts.  A
//! pass maps every pixel to its point on the complex plane and runs
//! the escape-time evaluator on it.  With more than one worker, the
//! rows are split into contiguous bands and each band is handed to its
//! own scoped thread; the bands are disjoint slices of the buffer, so
//! no worker can touch another's cells and nothing needs a lock.  The
//! pass does not return until every worker has joined.

use itertools::iproduct;
use log::{debug, trace};
use std::ops::{Index, Range};
use std::time::Instant;

use crate::errors::{MandelbrotError, Result};
use crate::escape::{escape_time, MandelbrotParams};
use crate::planes::{Bounds, Dimensions, Pixel};

/// A dense, row-major grid of escape counts, one per pixel.  A cell
/// holds either the iteration at which its point escaped or the
/// pass's `max_iterations` for points treated as interior.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationGrid {
    dimensions: Dimensions,
    cells: Vec<u32>,
}

impl IterationGrid {
    /// Allocates a zeroed grid.  Fails with `AllocationFailure` rather
    /// than aborting when the buffer cannot be had.
    pub fn new(dimensions: Dimensions) -> Result<IterationGrid> {
        let failure = MandelbrotError::AllocationFailure {
            width: dimensions.width(),
            height: dimensions.height(),
        };
        let len = match dimensions.cells() {
            Some(len) => len,
            None => return Err(failure),
        };
        let mut cells: Vec<u32> = Vec::new();
        if cells.try_reserve_exact(len).is_err() {
            return Err(failure);
        }
        cells.resize(len, 0);
        Ok(IterationGrid { dimensions, cells })
    }

    /// The pixel dimensions of the grid.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The offset of `pixel` in the flat buffer, if it lies on the grid.
    pub fn offset(&self, pixel: Pixel) -> Option<usize> {
        let Pixel(column, row) = pixel;
        if column < self.dimensions.width() && row < self.dimensions.height() {
            Some(row * self.dimensions.width() + column)
        } else {
            None
        }
    }

    /// The count at `pixel`, if it lies on the grid.
    pub fn get(&self, pixel: Pixel) -> Option<u32> {
        self.offset(pixel).map(|offset| self.cells[offset])
    }

    /// One row of counts, top row first.
    pub fn row(&self, row: usize) -> Option<&[u32]> {
        if row >= self.dimensions.height() {
            return None;
        }
        let width = self.dimensions.width();
        Some(&self.cells[row * width..(row + 1) * width])
    }

    /// All counts, row-major.
    pub fn as_slice(&self) -> &[u32] {
        &self.cells
    }
}

impl Index<Pixel> for IterationGrid {
    type Output = u32;

    fn index(&self, pixel: Pixel) -> &u32 {
        match self.offset(pixel) {
            Some(offset) => &self.cells[offset],
            None => panic!(
                "pixel {:?} lies outside a {}x{} grid",
                pixel,
                self.dimensions.width(),
                self.dimensions.height()
            ),
        }
    }
}

/// Splits `height` rows into `workers` contiguous bands.  Every band
/// but the last holds `height / workers` rows; the last takes the
/// remainder.  Zero or one worker yields the single band `0..height`.
pub fn band_ranges(height: usize, workers: usize) -> Vec<Range<usize>> {
    if workers <= 1 {
        return vec![0..height];
    }
    let step = height / workers;
    (0..workers)
        .map(|i| {
            let start = i * step;
            let end = if i == workers - 1 { height } else { start + step };
            start..end
        })
        .collect()
}

/// Fill one band of rows.  `cells` holds exactly the rows in `rows`.
fn fill_band(
    cells: &mut [u32],
    rows: Range<usize>,
    bounds: &Bounds,
    dimensions: Dimensions,
    params: &MandelbrotParams,
) {
    let width = dimensions.width();
    let first = rows.start;
    for (row, column) in iproduct!(rows, 0..width) {
        let point = bounds.pixel_to_point(dimensions, Pixel(column, row));
        cells[(row - first) * width + column] = escape_time(point, params);
    }
}

/// Evaluates the escape-time iteration over a whole grid, on as many
/// worker threads as it was configured with.  The worker count never
/// changes the result, only how long it takes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridEngine {
    params: MandelbrotParams,
    workers: usize,
}

impl GridEngine {
    /// `workers` of zero or one computes on the calling thread.
    pub fn new(params: MandelbrotParams, workers: usize) -> Self {
        GridEngine { params, workers }
    }

    /// An engine that never spawns.
    pub fn sequential(params: MandelbrotParams) -> Self {
        GridEngine::new(params, 1)
    }

    /// The parameters each pass runs with.
    pub fn params(&self) -> MandelbrotParams {
        self.params
    }

    /// The configured worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// The same engine with different per-pass parameters.
    pub fn with_params(&self, params: MandelbrotParams) -> Self {
        GridEngine { params, ..*self }
    }

    /// Allocates a fresh grid and fills it.  Either the whole grid
    /// comes back or an error does.
    pub fn compute(&self, bounds: &Bounds, dimensions: Dimensions) -> Result<IterationGrid> {
        let mut grid = IterationGrid::new(dimensions)?;
        self.compute_into(bounds, &mut grid)?;
        Ok(grid)
    }

    /// Refills an existing grid in place.  If this fails the grid's
    /// contents are unspecified and it should not be shown.
    pub fn compute_into(&self, bounds: &Bounds, grid: &mut IterationGrid) -> Result<()> {
        let dimensions = grid.dimensions();
        let width = dimensions.width();
        let started = Instant::now();
        // Bands past the last row would be empty.
        let workers = self.workers.min(dimensions.height());
        debug!(
            "Computing {}x{} grid over {:?} with {} worker(s)",
            width,
            dimensions.height(),
            bounds,
            workers
        );

        if workers <= 1 {
            fill_band(
                &mut grid.cells,
                0..dimensions.height(),
                bounds,
                dimensions,
                &self.params,
            );
        } else {
            let mut rest: &mut [u32] = &mut grid.cells;
            let mut bands = Vec::with_capacity(workers);
            for rows in band_ranges(dimensions.height(), workers) {
                let (band, tail) = std::mem::take(&mut rest).split_at_mut(rows.len() * width);
                rest = tail;
                if !rows.is_empty() {
                    bands.push((rows, band));
                }
            }

            let params = &self.params;
            crossbeam::scope(|spawner| {
                for (rows, band) in bands {
                    spawner.spawn(move |_| {
                        trace!("Band {:?} started", rows);
                        fill_band(band, rows, bounds, dimensions, params);
                    });
                }
            })
            .map_err(|_| MandelbrotError::WorkerPanicked)?;
        }

        debug!("Grid pass finished in {:?}", started.elapsed());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;

    fn dims(width: usize, height: usize) -> Dimensions {
        Dimensions::new(width, height).unwrap()
    }

    #[test]
    fn bands_cover_every_row_once() {
        for &(height, workers) in &[(97, 2), (97, 7), (97, 16), (10, 3), (4, 9)] {
            let bands = band_ranges(height, workers);
            assert_eq!(bands.len(), workers);
            let mut next = 0;
            for band in &bands {
                assert_eq!(band.start, next);
                next = band.end;
            }
            assert_eq!(next, height);
        }
    }

    #[test]
    fn last_band_takes_the_remainder() {
        let bands = band_ranges(97, 7);
        assert_eq!(bands[0], 0..13);
        assert_eq!(bands[5], 65..78);
        assert_eq!(bands[6], 78..97);
    }

    #[test]
    fn one_or_no_workers_is_one_band() {
        assert_eq!(band_ranges(50, 0), vec![0..50]);
        assert_eq!(band_ranges(50, 1), vec![0..50]);
    }

    #[test]
    fn offsets_are_row_major() {
        let grid = IterationGrid::new(dims(5, 3)).unwrap();
        assert_eq!(grid.offset(Pixel(0, 0)), Some(0));
        assert_eq!(grid.offset(Pixel(4, 0)), Some(4));
        assert_eq!(grid.offset(Pixel(0, 1)), Some(5));
        assert_eq!(grid.offset(Pixel(4, 2)), Some(14));
        assert_eq!(grid.offset(Pixel(5, 0)), None);
        assert_eq!(grid.offset(Pixel(0, 3)), None);
        assert_eq!(grid.row(2).map(|r| r.len()), Some(5));
        assert!(grid.row(3).is_none());
    }

    #[test]
    fn impossible_grids_fail_to_allocate() {
        let huge = dims(usize::max_value(), 2);
        assert_eq!(
            IterationGrid::new(huge),
            Err(MandelbrotError::AllocationFailure {
                width: usize::max_value(),
                height: 2,
            })
        );
    }

    #[test]
    fn sequential_pass_fills_every_cell() {
        let params = MandelbrotParams::new(50, 20).unwrap();
        let engine = GridEngine::sequential(params);
        let grid = engine.compute(&Bounds::default(), dims(16, 9)).unwrap();
        assert_eq!(grid.as_slice().len(), 16 * 9);
        assert!(grid.as_slice().iter().all(|&n| n <= 50));
        assert!(grid.as_slice().iter().any(|&n| n == 50));
        assert!(grid.as_slice().iter().any(|&n| n < 50));
    }

    #[test]
    fn cells_match_the_evaluator() {
        let params = MandelbrotParams::new(200, 20).unwrap();
        let bounds = Bounds::new(Complex::new(-2.0, -1.5), Complex::new(1.0, 1.5)).unwrap();
        let dimensions = dims(12, 10);
        let grid = GridEngine::new(params, 3).compute(&bounds, dimensions).unwrap();
        for (row, column) in iproduct!(0..10, 0..12) {
            let point = bounds.pixel_to_point(dimensions, Pixel(column, row));
            assert_eq!(grid[Pixel(column, row)], escape_time(point, &params));
        }
    }

    #[test]
    fn more_workers_than_rows() {
        let params = MandelbrotParams::new(40, 20).unwrap();
        let seq = GridEngine::sequential(params)
            .compute(&Bounds::default(), dims(8, 3))
            .unwrap();
        let par = GridEngine::new(params, 8)
            .compute(&Bounds::default(), dims(8, 3))
            .unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn absurd_worker_counts_are_capped_at_the_row_count() {
        let params = MandelbrotParams::new(40, 20).unwrap();
        let seq = GridEngine::sequential(params)
            .compute(&Bounds::default(), dims(8, 4))
            .unwrap();
        let par = GridEngine::new(params, usize::max_value())
            .compute(&Bounds::default(), dims(8, 4))
            .unwrap();
        assert_eq!(seq, par);
    }
}
