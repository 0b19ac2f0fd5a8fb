// Copyright 2025 the Gridpad Authors
// SPDX-License-Identifier: Apache-2.0

//! Grid line rasterization.
//!
//! Converts a straight segment between two grid cells into the discrete
//! set of cells the ideal line passes through, using the octant-aware
//! integer midpoint (Bresenham) algorithm. Line-drawing tools use this
//! both for the live tile-mode preview and for the final commit.

use crate::geometry::Cell;

/// Visit every cell on the straight line between `start` and `end`.
///
/// Cells are visited in major-axis order: the low-slope branch always
/// walks in increasing x (swapping endpoints if needed), the high-slope
/// branch in increasing y. Both endpoints are always visited, and the
/// resulting cell set is identical whichever endpoint comes first.
pub fn trace_cells<F: FnMut(Cell)>(start: Cell, end: Cell, mut visit: F) {
    if (end.y - start.y).abs() < (end.x - start.x).abs() {
        if start.x > end.x {
            trace_low(end, start, &mut visit);
        } else {
            trace_low(start, end, &mut visit);
        }
    } else if start.y > end.y {
        trace_high(end, start, &mut visit);
    } else {
        trace_high(start, end, &mut visit);
    }
}

/// Collect the traced cells into a vector.
pub fn cells_between(start: Cell, end: Cell) -> Vec<Cell> {
    let mut cells = Vec::new();
    trace_cells(start, end, |c| cells.push(c));
    cells
}

/// Low-slope branch: |dy| <= dx, x strictly increasing.
fn trace_low<F: FnMut(Cell)>(start: Cell, end: Cell, visit: &mut F) {
    let dx = end.x - start.x;
    let mut dy = end.y - start.y;
    let y_step = if dy < 0 { -1 } else { 1 };
    dy = dy.abs();

    // Error accumulator: D > 0 means the ideal line has crossed into the
    // next row.
    let mut d = 2 * dy - dx;
    let mut y = start.y;
    for x in start.x..=end.x {
        visit(Cell::new(x, y));
        if d > 0 {
            y += y_step;
            d -= 2 * dx;
        }
        d += 2 * dy;
    }
}

/// High-slope branch: |dx| <= dy, y strictly increasing.
fn trace_high<F: FnMut(Cell)>(start: Cell, end: Cell, visit: &mut F) {
    let mut dx = end.x - start.x;
    let dy = end.y - start.y;
    let x_step = if dx < 0 { -1 } else { 1 };
    dx = dx.abs();

    let mut d = 2 * dx - dy;
    let mut x = start.x;
    for y in start.y..=end.y {
        visit(Cell::new(x, y));
        if d > 0 {
            x += x_step;
            d -= 2 * dy;
        }
        d += 2 * dx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(s: (i32, i32), e: (i32, i32)) -> Vec<Cell> {
        cells_between(s.into(), e.into())
    }

    #[test]
    fn test_horizontal_line() {
        let expected: Vec<Cell> = (0..=5).map(|x| Cell::new(x, 0)).collect();
        assert_eq!(cells((0, 0), (5, 0)), expected);
    }

    #[test]
    fn test_vertical_line() {
        let expected: Vec<Cell> = (0..=4).map(|y| Cell::new(2, y)).collect();
        assert_eq!(cells((2, 0), (2, 4)), expected);
    }

    #[test]
    fn test_diagonal_45() {
        let expected = vec![
            Cell::new(0, 0),
            Cell::new(1, 1),
            Cell::new(2, 2),
            Cell::new(3, 3),
        ];
        assert_eq!(cells((0, 0), (3, 3)), expected);
    }

    #[test]
    fn test_shallow_line_endpoints_and_monotonic_x() {
        let line = cells((0, 0), (5, 2));
        assert_eq!(line.first(), Some(&Cell::new(0, 0)));
        assert_eq!(line.last(), Some(&Cell::new(5, 2)));
        assert!(line.windows(2).all(|w| w[0].x <= w[1].x));
        assert_eq!(
            line,
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(2, 1),
                Cell::new(3, 1),
                Cell::new(4, 2),
                Cell::new(5, 2),
            ]
        );
    }

    #[test]
    fn test_endpoint_symmetry() {
        let pairs = [
            ((0, 0), (5, 2)),
            ((0, 0), (2, 5)),
            ((-3, 4), (6, -1)),
            ((7, 7), (0, 0)),
            ((1, -8), (-2, 3)),
        ];
        for (a, b) in pairs {
            assert_eq!(cells(a, b), cells(b, a), "{a:?} <-> {b:?}");
        }
    }

    #[test]
    fn test_negative_direction_octants() {
        // Steep line pointing up-left: walked in increasing y from the
        // lower endpoint.
        let line = cells((3, 5), (1, 0));
        assert_eq!(line.first(), Some(&Cell::new(1, 0)));
        assert_eq!(line.last(), Some(&Cell::new(3, 5)));
        assert!(line.windows(2).all(|w| w[0].y < w[1].y));

        // Shallow line pointing down-left: walked in increasing x.
        let line = cells((4, 1), (-2, -1));
        assert_eq!(line.first(), Some(&Cell::new(-2, -1)));
        assert_eq!(line.last(), Some(&Cell::new(4, 1)));
        assert!(line.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn test_single_cell() {
        assert_eq!(cells((3, 3), (3, 3)), vec![Cell::new(3, 3)]);
    }
}
