//! Flow field: one direction angle per grid cell.
//!
//! The canvas is divided into `cols x rows` square cells of `cell_size`
//! pixels. Cell `(x, y)` holds `(cos(x * zoom) + sin(y * zoom)) * curve`
//! radians, stored row-major. The field is computed once and never changes.

use crate::error::FlowError;
use serde::Serialize;

/// Largest number of cells a field may hold (a 4096x4096 grid).
pub const MAX_FIELD_CELLS: usize = 1 << 24;

/// Precomputed grid of flow angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowField {
    rows: usize,
    cols: usize,
    cell_size: f64,
    cells: Vec<f64>,
}

impl FlowField {
    /// Builds the field for a `width x height` canvas.
    ///
    /// `rows = floor(height / cell_size)`, `cols = floor(width / cell_size)`.
    ///
    /// Returns `FlowError::InvalidCellSize` unless `cell_size` is positive and
    /// finite, `FlowError::EmptyGrid` if the canvas is smaller than one
    /// cell in either direction, and `FlowError::FieldTooLarge` if the grid
    /// would exceed [`MAX_FIELD_CELLS`].
    pub fn new(
        width: usize,
        height: usize,
        cell_size: f64,
        curve: f64,
        zoom: f64,
    ) -> Result<Self, FlowError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(FlowError::InvalidCellSize(cell_size));
        }
        let rows = (height as f64 / cell_size).floor() as usize;
        let cols = (width as f64 / cell_size).floor() as usize;
        let len = rows
            .checked_mul(cols)
            .filter(|&n| n <= MAX_FIELD_CELLS)
            .ok_or(FlowError::FieldTooLarge { rows, cols })?;
        if len == 0 {
            return Err(FlowError::EmptyGrid {
                width,
                height,
                cell_size,
            });
        }

        let mut cells = Vec::with_capacity(len);
        for y in 0..rows {
            let row_term = (y as f64 * zoom).sin();
            for x in 0..cols {
                cells.push(((x as f64 * zoom).cos() + row_term) * curve);
            }
        }

        Ok(Self {
            rows,
            cols,
            cell_size,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Row-major angles, `cells()[row * cols + col]`.
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// Angle of cell `(col, row)`, or `None` outside the grid.
    pub fn angle(&self, col: usize, row: usize) -> Option<f64> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Grid cell containing the canvas point `(x, y)`.
    ///
    /// Points off the grid (particles drift freely past the canvas edges, and
    /// the rightmost/bottom strip narrower than a cell has no cell of its own)
    /// clamp to the nearest edge cell.
    pub fn cell_of(&self, x: f64, y: f64) -> (usize, usize) {
        let clamp = |v: f64, cells: usize| -> usize {
            let i = (v / self.cell_size).floor();
            if i.is_nan() || i <= 0.0 {
                0
            } else {
                (i as usize).min(cells - 1)
            }
        };
        (clamp(x, self.cols), clamp(y, self.rows))
    }

    /// Angle steering a particle at the canvas point `(x, y)`.
    pub fn angle_at(&self, x: f64, y: f64) -> f64 {
        let (col, row) = self.cell_of(x, y);
        self.cells[row * self.cols + col]
    }
}
