//! Pieces module - tetromino geometry
//!
//! Shapes are stored as four absolute `(row, col)` points with row 0 at the
//! bottom of the board. Point index 1 is the rotation pivot for every kind.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, BOARD_WIDTH};

/// A grid coordinate, row 0 is the bottom row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub row: i8,
    pub col: i8,
}

impl Point {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

/// The four cells of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape([Point; 4]);

impl Shape {
    pub const fn new(points: [Point; 4]) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }

    /// Shift every point by `(d_row, d_col)`
    pub fn translated(&self, d_row: i8, d_col: i8) -> Self {
        Self(self.0.map(|p| Point::new(p.row + d_row, p.col + d_col)))
    }

    pub fn down(&self) -> Self {
        self.translated(-1, 0)
    }

    pub fn left(&self) -> Self {
        self.translated(0, -1)
    }

    pub fn right(&self) -> Self {
        self.translated(0, 1)
    }

    /// Rotate 90° clockwise around the pivot (point 1)
    ///
    /// With rows growing upwards, a clockwise turn maps an offset
    /// `(d_row, d_col)` from the pivot to `(-d_col, d_row)`.
    pub fn rotated_cw(&self) -> Self {
        let pivot = self.0[1];
        Self(self.0.map(|p| {
            let d_row = p.row - pivot.row;
            let d_col = p.col - pivot.col;
            Point::new(pivot.row - d_col, pivot.col + d_row)
        }))
    }

    /// Distinct rows covered by this shape, ascending
    pub fn rows(&self) -> ArrayVec<i8, 4> {
        let mut rows = ArrayVec::new();
        for p in &self.0 {
            if !rows.contains(&p.row) {
                rows.push(p.row);
            }
        }
        rows.sort_unstable();
        rows
    }

    pub fn min_row(&self) -> i8 {
        self.0.iter().map(|p| p.row).min().unwrap_or(0)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.0.contains(&point)
    }

    /// Number of columns spanned
    pub fn width(&self) -> u8 {
        let min = self.0.iter().map(|p| p.col).min().unwrap_or(0);
        let max = self.0.iter().map(|p| p.col).max().unwrap_or(0);
        (max - min + 1) as u8
    }
}

const fn p(row: i8, col: i8) -> Point {
    Point::new(row, col)
}

/// Spawn-orientation shape of a kind, anchored at row 0 / column 0
pub fn base_shape(kind: PieceKind) -> Shape {
    let points = match kind {
        PieceKind::I => [p(1, 0), p(1, 1), p(1, 2), p(1, 3)],
        PieceKind::J => [p(0, 0), p(0, 1), p(0, 2), p(1, 0)],
        PieceKind::L => [p(0, 0), p(0, 1), p(0, 2), p(1, 2)],
        PieceKind::O => [p(0, 0), p(0, 1), p(1, 0), p(1, 1)],
        PieceKind::S => [p(0, 0), p(0, 1), p(1, 1), p(1, 2)],
        PieceKind::T => [p(0, 0), p(0, 1), p(0, 2), p(1, 1)],
        PieceKind::Z => [p(1, 0), p(1, 1), p(0, 1), p(0, 2)],
    };
    Shape::new(points)
}

/// Number of distinct spawn column offsets for a kind
///
/// I: 7, O: 9, everything else: 8.
pub fn spawn_columns(kind: PieceKind) -> u8 {
    BOARD_WIDTH - base_shape(kind).width() + 1
}
