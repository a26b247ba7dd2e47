//! Decaying density grid of agent visitation.
//!
//! Each cell accumulates history when an agent visits it and decays toward
//! zero every tick. Decay is proportional to the grid's observed peak rather
//! than each cell's own value, so hot spots fade uniformly instead of the
//! brightest cells lingering forever.

use serde::{Deserialize, Serialize};

/// Initial high-water mark, so a freshly reset grid renders faint instead of
/// saturating on the first few visits.
const INITIAL_PEAK: f32 = 10.0;

/// Scale factor turning the attenuation rate into a per-tick decrement.
const ATTENUATION_SCALE: f32 = 100_000.0;

/// A 2-D accumulator over world space tracking recent agent presence.
///
/// `max_observed` is a running high-water mark: it only grows (or holds level)
/// as cells heat up and never shrinks as they cool, so intensity ratios stay
/// comparable across ticks. It resets only when the grid is rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityGrid {
    cols: usize,
    rows: usize,
    cell_size: f32,
    /// Visit history per cell, row-major, always `>= 0`.
    history: Vec<f32>,
    max_observed: f32,
}

impl DensityGrid {
    /// Builds a zeroed grid covering `max_x × max_y` world units.
    pub fn new(max_x: f32, max_y: f32, cell_size: f32) -> Self {
        let cols = (max_x / cell_size).ceil() as usize;
        let rows = (max_y / cell_size).ceil() as usize;

        Self {
            cols,
            rows,
            cell_size,
            history: vec![0.0; cols * rows],
            max_observed: INITIAL_PEAK,
        }
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Current high-water mark of cell history.
    pub fn max_observed(&self) -> f32 {
        self.max_observed
    }

    /// Records an agent visit at a world position.
    ///
    /// Coordinates map to cells by flooring against the cell size. Positions
    /// outside the grid are silently ignored: agents are legitimately a step
    /// past the edge mid boundary-transition, and that is not an error.
    pub fn record_visit(&mut self, x: f32, y: f32, increase: f32) {
        let cx = (x / self.cell_size).floor();
        let cy = (y / self.cell_size).floor();

        if cx < 0.0 || cy < 0.0 {
            return;
        }
        let (cx, cy) = (cx as usize, cy as usize);
        if cx >= self.cols || cy >= self.rows {
            return;
        }

        let cell = &mut self.history[cy * self.cols + cx];
        *cell += increase;
        self.max_observed = self.max_observed.max(*cell);
    }

    /// Decays every cell toward zero, proportionally to the observed peak.
    pub fn decay_tick(&mut self, attenuation_rate: f32) {
        let decrement = self.max_observed * attenuation_rate / ATTENUATION_SCALE;
        for cell in &mut self.history {
            *cell = (*cell - decrement).max(0.0);
        }
    }

    /// Raw history of one cell, or 0 outside the grid.
    pub fn history(&self, cx: usize, cy: usize) -> f32 {
        if cx < self.cols && cy < self.rows {
            self.history[cy * self.cols + cx]
        } else {
            0.0
        }
    }

    /// Normalized intensity of one cell in `[0, 1]`, the ratio the
    /// presentation layer maps to color.
    pub fn intensity(&self, cx: usize, cy: usize) -> f32 {
        self.history(cx, cy) / self.max_observed
    }

    /// Intensities of every cell, row-major.
    pub fn intensities(&self) -> Vec<f32> {
        self.history
            .iter()
            .map(|h| h / self.max_observed)
            .collect()
    }
}
