// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Small geometry helpers shared across the crate.
//!
//! Continuous coordinates use [`kurbo`] value types throughout. Discrete
//! grid coordinates get their own [`Cell`] type so pixel-space and
//! cell-space positions cannot be confused.

use kurbo::{Point, Size};

// ===== Cell =====

/// An integer grid-cell coordinate.
///
/// Produced from a world-space position by floor-division with the grid
/// cell size; see [`cell_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// The cell at the grid origin.
    pub const ZERO: Cell = Cell { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell { x, y }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

// ===== Conversions =====

/// The cell containing a world-space point, by componentwise floor-division.
pub fn cell_of(world: Point, cell_size: Size) -> Cell {
    Cell {
        x: (world.x / cell_size.width).floor() as i32,
        y: (world.y / cell_size.height).floor() as i32,
    }
}

/// Clamp a point componentwise into the box spanned by `min` and `max`.
pub fn clamp_point(value: Point, min: Point, max: Point) -> Point {
    Point::new(value.x.clamp(min.x, max.x), value.y.clamp(min.y, max.y))
}

/// Snap a point to the integer pixel containing it.
pub fn floor_point(value: Point) -> Point {
    Point::new(value.x.floor(), value.y.floor())
}
