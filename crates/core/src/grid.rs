//! Grid module - fixed 22x10 cell storage
//!
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates are `(row, col)` with row 0 at the bottom and col 0 on the left.
//! Rows 20 and 21 are the spawn buffer: hidden from the player but part of
//! every collision test.

use crate::pieces::{Point, Shape};
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells in the grid
pub const GRID_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Locked cells of the board, row-major with row 0 first
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(point: Point) -> Option<usize> {
        if Self::is_out_of_bounds(point) {
            return None;
        }
        Some((point.row as usize) * WIDTH + (point.col as usize))
    }

    pub fn is_out_of_bounds(point: Point) -> bool {
        point.row < 0
            || point.row >= BOARD_HEIGHT as i8
            || point.col < 0
            || point.col >= BOARD_WIDTH as i8
    }

    /// Cell at `point`, `None` when out of bounds
    pub fn get(&self, point: Point) -> Option<Cell> {
        Self::index(point).map(|idx| self.cells[idx])
    }

    /// Set the cell at `point`. Returns false if out of bounds.
    pub fn set(&mut self, point: Point, cell: Cell) -> bool {
        match Self::index(point) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_free(&self, point: Point) -> bool {
        matches!(self.get(point), Some(Cell::Empty))
    }

    /// True when any point of `shape` is out of bounds or on a filled cell
    pub fn collides(&self, shape: &Shape) -> bool {
        shape.points().iter().any(|&p| !self.is_free(p))
    }

    /// Paint all four cells of `shape`
    ///
    /// Callers must only paint shapes that passed a collision test.
    pub fn fill_shape(&mut self, shape: &Shape, cell: Cell) {
        for &p in shape.points() {
            let painted = self.set(p, cell);
            assert!(painted, "fill_shape: {:?} is outside the grid", p);
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// No column of `row` is empty
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        self.row(row).iter().all(|cell| !cell.is_empty())
    }

    /// Delete `row`, shifting every row above it down by one
    ///
    /// The top row is cleared afterwards.
    pub fn delete_row(&mut self, row: usize) {
        assert!(row < HEIGHT, "delete_row: row {} out of range", row);

        // copy_within handles the overlapping ranges
        let start = (row + 1) * WIDTH;
        self.cells.copy_within(start.., row * WIDTH);

        let top = (HEIGHT - 1) * WIDTH;
        self.cells[top..].fill(Cell::Empty);
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy into a 2D array, `out[row][col]`
    pub fn write_rows(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (row, dst) in out.iter_mut().enumerate() {
            dst.copy_from_slice(self.row(row));
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
