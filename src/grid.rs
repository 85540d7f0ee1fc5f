//! Geometry of the sensor grid, and the biased choice of which cell a new connection reads.

use crate::constants::{
    GADANEAT_GRID_HEIGHT, GADANEAT_GRID_WIDTH, GADANEAT_SAMPLER_MAX_DRAWS,
    GADANEAT_SAMPLER_MEAN_COL, GADANEAT_SAMPLER_MEAN_ROW, GADANEAT_SAMPLER_VAR_COL,
    GADANEAT_SAMPLER_VAR_ROW,
};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// A grid of sensor cells, read in row-major order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of cells, and so of input nodes. Only meaningful for grids that passed
    /// [Grid::checked_cells].
    #[inline]
    pub const fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Number of cells, or None if it doesn't fit a usize
    #[inline]
    pub const fn checked_cells(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Row-major index of a cell, or None if it lies off the grid
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then_some(row * self.width + col)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GADANEAT_GRID_WIDTH, GADANEAT_GRID_HEIGHT)
    }
}

/// Chooses input cells from a two dimensional gaussian with independent axes, so that new
/// connections favour the area around the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSampler {
    pub mean_row: f64,
    pub var_row: f64,
    pub mean_col: f64,
    pub var_col: f64,
    /// off-grid draws tolerated before giving up on one sample
    pub max_draws: usize,
}

impl Default for InputSampler {
    fn default() -> Self {
        Self {
            mean_row: GADANEAT_SAMPLER_MEAN_ROW,
            var_row: GADANEAT_SAMPLER_VAR_ROW,
            mean_col: GADANEAT_SAMPLER_MEAN_COL,
            var_col: GADANEAT_SAMPLER_VAR_COL,
            max_draws: GADANEAT_SAMPLER_MAX_DRAWS,
        }
    }
}

impl InputSampler {
    /// Draw a cell index for `grid`. Draws falling off the grid are rejected and drawn again;
    /// returns None if `max_draws` draws all missed, or the distribution is degenerate.
    pub fn sample(&self, grid: Grid, rng: &mut impl Rng) -> Option<usize> {
        let rows = Normal::new(self.mean_row, self.var_row.sqrt()).ok()?;
        let cols = Normal::new(self.mean_col, self.var_col.sqrt()).ok()?;
        let (height, width) = (grid.height as f64, grid.width as f64);

        for _ in 0..self.max_draws {
            let row = rows.sample(rng);
            let col = cols.sample(rng);
            if (0. ..height).contains(&row) && (0. ..width).contains(&col) {
                return grid.index(row.floor() as usize, col.floor() as usize);
            }
        }

        None
    }
}
