// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! The cell grid: dimensions, cell size, and the host setup message.
//!
//! The grid is fixed at setup time by a message from the host shell and
//! only changes when a resize request re-applies it. Cell coordinates
//! are valid in `[0, columns) x [0, rows)`; the grid does not enforce
//! the range itself, callers clamp before converting.

use crate::geometry::{Cell, cell_of};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Setup message sent by the host at startup and on resize requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSetup {
    pub columns: u32,
    pub rows: u32,
    pub cell_size: CellSize,
}

/// Wire form of a cell size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

/// Error applying a [`GridSetup`] message.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid must have at least one column and row, got {columns}x{rows}")]
    EmptyGrid { columns: u32, rows: u32 },
    #[error("cell size must be positive and finite, got {width}x{height}")]
    BadCellSize { width: f64, height: f64 },
}

/// The active grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cell_size: Size,
}

impl Grid {
    /// Validate and apply a setup message.
    pub fn from_setup(setup: &GridSetup) -> Result<Self, GridError> {
        if setup.columns == 0 || setup.rows == 0 {
            return Err(GridError::EmptyGrid {
                columns: setup.columns,
                rows: setup.rows,
            });
        }
        let CellSize { width, height } = setup.cell_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GridError::BadCellSize { width, height });
        }
        Ok(Grid {
            columns: setup.columns,
            rows: setup.rows,
            cell_size: Size::new(width, height),
        })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cell_size(&self) -> Size {
        self.cell_size
    }

    /// Total grid extent in world pixels.
    pub fn size(&self) -> Size {
        Size::new(
            self.columns as f64 * self.cell_size.width,
            self.rows as f64 * self.cell_size.height,
        )
    }

    /// The grid's world-space bounds, anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size())
    }

    /// The cell containing a world-space point.
    pub fn cell_at(&self, world: Point) -> Cell {
        cell_of(world, self.cell_size)
    }

    /// The world-space rectangle covered by a cell.
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        Rect::from_origin_size(
            Point::new(
                cell.x as f64 * self.cell_size.width,
                cell.y as f64 * self.cell_size.height,
            ),
            self.cell_size,
        )
    }

    /// Whether a cell lies inside the configured range.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.columns
            && (cell.y as u32) < self.rows
    }
}
