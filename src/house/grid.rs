use std::ops::Range;

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::geom::Rect;

/// Discrete view of the floor plan: grid dimensions plus the shared
/// continuous-to-cell coordinate mapping.
///
/// Rows follow y, columns follow x. Cell (row, col) covers
/// `[col*step, (col+1)*step) x [row*step, (row+1)*step)`, so cell centers sit
/// half a step off the origin. Flattened indices are row-major
/// (y outer, x inner).
///
/// Every continuous-to-discrete conversion in the crate goes through this
/// type: the layout rasterizer, the area query and the per-step heater zone
/// lookup all share the same floor-division rules. Scalar positions clamp to
/// the grid extent and index ranges clip to it, so painting and querying are
/// total for any well-formed geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMap {
    /// Number of columns (x direction).
    pub n_x: usize,
    /// Number of rows (y direction).
    pub n_y: usize,
    /// Cell size in meters.
    pub step: f64,
}

impl GridMap {
    /// Derives grid dimensions from the bounding box of the given rooms.
    ///
    /// The grid always spans `[0, max_x) x [0, max_y)` regardless of where the
    /// lowest room corner sits. A geometry whose bounding box yields zero rows
    /// or columns is a fatal configuration error.
    pub fn from_rooms(rooms: &[Rect], step: f64) -> Result<Self> {
        ensure!(step > 0.0, "grid step must be positive, got {step}");

        let max_x = rooms.iter().map(|r| r.max.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = rooms.iter().map(|r| r.max.y).fold(f64::NEG_INFINITY, f64::max);

        let n_x = axis_cells(max_x, step);
        let n_y = axis_cells(max_y, step);
        ensure!(
            n_x > 0 && n_y > 0,
            "floor plan produces an empty grid ({n_x} x {n_y} cells); \
             add at least one room with positive extent"
        );

        Ok(Self { n_x, n_y, step })
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.n_x * self.n_y
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattened row-major index of cell (row, col).
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.n_y && col < self.n_x);
        row * self.n_x + col
    }

    /// Raw column of a continuous x coordinate (floor division, unclamped).
    pub fn col_floor(&self, x: f64) -> i64 {
        floor_div(x, self.step)
    }

    /// Raw row of a continuous y coordinate (floor division, unclamped).
    pub fn row_floor(&self, y: f64) -> i64 {
        floor_div(y, self.step)
    }

    /// Column of a continuous x coordinate, clamped to the grid.
    pub fn col(&self, x: f64) -> usize {
        self.clamp_col(self.col_floor(x))
    }

    /// Row of a continuous y coordinate, clamped to the grid.
    pub fn row(&self, y: f64) -> usize {
        self.clamp_row(self.row_floor(y))
    }

    pub fn clamp_col(&self, col: i64) -> usize {
        col.clamp(0, self.n_x as i64 - 1) as usize
    }

    pub fn clamp_row(&self, row: i64) -> usize {
        row.clamp(0, self.n_y as i64 - 1) as usize
    }

    /// Clips a raw half-open column range to the grid.
    pub fn clip_cols(&self, start: i64, end: i64) -> Range<usize> {
        clip(start, end, self.n_x)
    }

    /// Clips a raw half-open row range to the grid.
    pub fn clip_rows(&self, start: i64, end: i64) -> Range<usize> {
        clip(start, end, self.n_y)
    }

    /// Cell center x coordinates.
    pub fn xs(&self) -> Vec<f64> {
        let shift = self.step / 2.0;
        (0..self.n_x).map(|i| shift + i as f64 * self.step).collect()
    }

    /// Cell center y coordinates.
    pub fn ys(&self) -> Vec<f64> {
        let shift = self.step / 2.0;
        (0..self.n_y).map(|i| shift + i as f64 * self.step).collect()
    }
}

/// Number of cell centers `step/2 + k*step` that fit below `extent`.
fn axis_cells(extent: f64, step: f64) -> usize {
    let first = step / 2.0;
    if !extent.is_finite() || extent <= first {
        return 0;
    }
    ((extent - first) / step).ceil() as usize
}

fn clip(start: i64, end: i64, n: usize) -> Range<usize> {
    let lo = start.clamp(0, n as i64) as usize;
    let hi = end.clamp(0, n as i64) as usize;
    lo..hi.max(lo)
}

/// Floor division of a coordinate by the step.
///
/// Evaluated through the remainder rather than as `(value / step).floor()`:
/// the rounded quotient can land on the wrong side of an integer when the
/// coordinate sits within an ulp of a cell boundary (`2.0 / 0.1` rounds up to
/// exactly 20.0), and cell assignment must follow the exact quotient
/// (`floor(2.0 / 0.1) == 19` since the stored 0.1 is slightly above one
/// tenth).
fn floor_div(value: f64, step: f64) -> i64 {
    let rem = value % step;
    let base = if rem < 0.0 {
        (value - rem) / step - 1.0
    } else {
        (value - rem) / step
    };
    let floored = base.floor();
    // The final division may itself round to just below the integer.
    if base - floored > 0.5 {
        floored as i64 + 1
    } else {
        floored as i64
    }
}

/// Flattened indices of the cells enclosed by `rect`, both end rows and
/// columns included, in ascending (row-major) order.
///
/// This is the one cell-membership rule shared by the public area query and
/// the heater controller's per-step room lookup.
pub fn area_cells(map: &GridMap, rect: &Rect) -> Vec<usize> {
    let rows = map.clip_rows(map.row_floor(rect.min.y), map.row_floor(rect.max.y) + 1);
    let cols = map.clip_cols(map.col_floor(rect.min.x), map.col_floor(rect.max.x) + 1);

    let mut cells = Vec::with_capacity(rows.len() * cols.len());
    for row in rows {
        for col in cols.clone() {
            cells.push(map.index(row, col));
        }
    }
    cells
}

/// Boolean selection mask over the grid, produced by the area query.
#[derive(Debug, Clone)]
pub struct AreaMask {
    map: GridMap,
    cells: Vec<bool>,
}

impl AreaMask {
    pub(crate) fn from_rect(map: GridMap, rect: &Rect) -> Self {
        let mut cells = vec![false; map.len()];
        for idx in area_cells(&map, rect) {
            cells[idx] = true;
        }
        Self { map, cells }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn is_selected(&self, row: usize, col: usize) -> bool {
        self.cells[self.map.index(row, col)]
    }

    /// Flattened indices of the selected cells, ascending.
    pub fn selected(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| s.then_some(i))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&s| s).count()
    }
}
