//! Board module - the rules engine
//!
//! The board owns the grid of locked cells, the falling piece, the next piece
//! preview, the score and the game-over flag. The falling piece is kept as
//! geometry next to the grid rather than painted into it, so collision tests
//! never see the piece's own cells and a rejected move leaves nothing to undo.
//! [`Board::cells`] composes both into the view a renderer draws.
//!
//! Every operation here is total: out-of-range writes are defects and panic.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::pieces::{base_shape, spawn_columns, Point, Shape};
use crate::rng::SimpleRng;
use crate::scoring::calculate_clear_score;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_ROW};

/// Composed `[row][col]` view of the board, row 0 at the bottom
pub type CellRows = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl ActivePiece {
    pub fn color(&self) -> Cell {
        self.kind.color()
    }
}

/// Horizontal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Emitted every time a piece locks (consumed by observers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub rows_cleared: u32,
    pub clear_score: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    active: Option<ActivePiece>,
    next: PieceKind,
    score: u32,
    game_over: bool,
    rng: SimpleRng,
    last_event: Option<LockEvent>,
}

impl Board {
    /// Create an empty board with the next piece already chosen
    ///
    /// No piece is falling until [`Board::add_piece`] is called.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = rng.next_kind();
        Self {
            grid: Grid::new(),
            active: None,
            next,
            score: 0,
            game_over: false,
            rng,
            last_event: None,
        }
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn active_kind(&self) -> Option<PieceKind> {
        self.active.map(|a| a.kind)
    }

    pub fn active_shape(&self) -> Option<Shape> {
        self.active.map(|a| a.shape)
    }

    pub fn active_color(&self) -> Option<Cell> {
        self.active.map(|a| a.color())
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    /// Locked cells only
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Spawn the next piece at the top of the board
    ///
    /// The column offset is drawn so the whole piece fits: 7 choices for I,
    /// 9 for O, 8 for the rest. The piece sits in the two buffer rows.
    /// A spawn that overlaps locked cells ends the game.
    pub fn add_piece(&mut self) {
        let kind = self.next;
        let offset = self.rng.next_range(spawn_columns(kind) as u32) as i8;
        let shape = base_shape(kind).translated(SPAWN_ROW, offset);

        if self.check_collision(&shape) {
            log::info!("spawn of {:?} at column {} is blocked", kind, offset);
            self.game_over = true;
        }

        self.active = Some(ActivePiece { kind, shape });
        self.next = self.rng.next_kind();
        log::debug!("spawned {:?} at column {}, next {:?}", kind, offset, self.next);
    }

    /// True iff a point is outside the grid or lands on a locked cell
    pub fn check_collision(&self, shape: &Shape) -> bool {
        self.grid.collides(shape)
    }

    /// Shift the falling piece one column. Returns whether it moved.
    pub fn move_piece(&mut self, dir: Direction) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shape.translated(0, dir.delta());
        if self.check_collision(&moved) {
            return false;
        }

        self.active = Some(ActivePiece {
            shape: moved,
            ..active
        });
        true
    }

    /// Rotate the falling piece 90° clockwise. Returns whether it rotated.
    ///
    /// O never rotates. A blocked rotation tries exactly one kick per
    /// direction, in order: one right, one left, one down. If all three
    /// collide the piece is left as it was.
    pub fn rotate_piece(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if active.kind == PieceKind::O {
            return false;
        }

        let rotated = active.shape.rotated_cw();
        let candidates = [rotated, rotated.right(), rotated.left(), rotated.down()];
        let Some(shape) = candidates
            .into_iter()
            .find(|candidate| !self.check_collision(candidate))
        else {
            return false;
        };

        self.active = Some(ActivePiece { shape, ..active });
        true
    }

    /// Whether the falling piece has something directly below it
    pub fn is_touching_floor(&self) -> bool {
        match self.active {
            Some(active) => self.check_collision(&active.shape.down()),
            None => false,
        }
    }

    /// Move the falling piece one row down, locking it if it cannot move
    ///
    /// Returns true when the piece locked. A lock paints the piece into the
    /// grid, ends the game if the piece never left the buffer rows, clears
    /// completed rows and spawns the next piece.
    pub fn apply_gravity(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let lowered = active.shape.down();
        if !self.check_collision(&lowered) {
            self.active = Some(ActivePiece {
                shape: lowered,
                ..active
            });
            return false;
        }

        self.grid.fill_shape(&active.shape, active.color());
        self.active = None;

        if active.shape.min_row() >= SPAWN_ROW {
            log::info!("{:?} locked inside the spawn buffer", active.kind);
            self.game_over = true;
        }

        let score_before = self.score;
        let rows_cleared = self.check_row_completion(&active.shape);
        log::debug!(
            "locked {:?} at rows {:?}, cleared {}",
            active.kind,
            active.shape.rows().as_slice(),
            rows_cleared
        );

        self.last_event = Some(LockEvent {
            kind: active.kind,
            rows_cleared,
            clear_score: self.score - score_before,
            game_over: self.game_over,
        });

        self.add_piece();
        true
    }

    /// Drop the falling piece to its resting row and lock it
    ///
    /// Returns the number of gravity steps taken, the last one being the
    /// lock. Bounded by the board height.
    pub fn instafall(&mut self) -> u32 {
        if self.active.is_none() {
            return 0;
        }

        let mut steps = 0;
        loop {
            steps += 1;
            if self.apply_gravity() {
                return steps;
            }
            debug_assert!(steps <= BOARD_HEIGHT as u32, "instafall never landed");
        }
    }

    /// Delete completed rows among those `shape` covers
    ///
    /// Deleting a row pulls everything above it down by one, which can bring
    /// another completed row into one of the scanned rows, so the scan repeats
    /// over the same row set until a pass deletes nothing. Returns the number
    /// of rows deleted and adds their score.
    pub fn check_row_completion(&mut self, shape: &Shape) -> u32 {
        let rows: ArrayVec<i8, 4> = shape.rows();
        let mut deleted = 0u32;

        loop {
            let mut deleted_this_pass = false;
            for &row in &rows {
                let row = row as usize;
                if self.grid.is_row_full(row) {
                    self.grid.delete_row(row);
                    deleted += 1;
                    deleted_this_pass = true;
                }
            }
            if !deleted_this_pass {
                break;
            }
        }

        self.add_score(calculate_clear_score(deleted).total);
        deleted
    }

    /// Where the falling piece would land if dropped now
    pub fn ghost_shape(&self) -> Option<Shape> {
        let active = self.active?;
        let mut ghost = active.shape;
        while !self.check_collision(&ghost.down()) {
            ghost = ghost.down();
        }
        Some(ghost)
    }

    /// Locked cells with the falling piece painted on top
    pub fn cells(&self) -> CellRows {
        let mut out = [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.cells_into(&mut out);
        out
    }

    pub fn cells_into(&self, out: &mut CellRows) {
        self.grid.write_rows(out);
        if let Some(active) = self.active {
            for p in active.shape.points() {
                out[p.row as usize][p.col as usize] = active.color();
            }
        }
    }

    /// Cell of the composed view, `None` when out of bounds
    pub fn cell(&self, point: Point) -> Option<Cell> {
        if let Some(active) = self.active {
            if active.shape.contains(point) {
                return Some(active.color());
            }
        }
        self.grid.get(point)
    }

    /// Set a locked cell. Returns false if out of bounds or `cell` is the
    /// ghost, which only exists in rendered views.
    pub fn set(&mut self, point: Point, cell: Cell) -> bool {
        if cell == Cell::Ghost {
            return false;
        }
        self.grid.set(point, cell)
    }

    /// Replace the falling piece, for scripted setups
    ///
    /// Returns false (and changes nothing) if the shape collides.
    pub fn place_active(&mut self, kind: PieceKind, shape: Shape) -> bool {
        if self.check_collision(&shape) {
            return false;
        }
        self.active = Some(ActivePiece { kind, shape });
        true
    }

    /// Override the previewed next piece, for scripted setups
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = kind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row_except(board: &mut Board, row: i8, gap: Option<i8>) {
        for col in 0..BOARD_WIDTH as i8 {
            if Some(col) != gap {
                board.set(Point::new(row, col), Cell::Red);
            }
        }
    }

    #[test]
    fn test_new_board_has_no_active_piece() {
        let board = Board::new(1);
        assert!(board.active().is_none());
        assert!(!board.is_game_over());
        assert_eq!(board.score(), 0);
        assert!(board.grid().cells().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_add_piece_promotes_next() {
        let mut board = Board::new(5);
        let next = board.next_kind();
        board.add_piece();
        let active = board.active().unwrap();
        assert_eq!(active.kind, next);
        assert!(active.shape.points().iter().all(|p| p.row >= SPAWN_ROW));
        // The grid holds locked cells only
        assert!(board.grid().cells().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_gravity_moves_down_one_row() {
        let mut board = Board::new(1);
        let shape = base_shape(PieceKind::T).translated(10, 3);
        assert!(board.place_active(PieceKind::T, shape));
        assert!(!board.apply_gravity());
        assert_eq!(board.active_shape(), Some(shape.down()));
    }

    #[test]
    fn test_lock_records_event() {
        let mut board = Board::new(1);
        fill_row_except(&mut board, 0, Some(0));
        let vertical_i = base_shape(PieceKind::I).rotated_cw();
        // Column 0, rows 0..=3
        let shape = vertical_i.translated(-vertical_i.min_row(), -1);
        assert!(board.place_active(PieceKind::I, shape));

        assert!(board.apply_gravity());
        let event = board.take_last_event().unwrap();
        assert_eq!(event.kind, PieceKind::I);
        assert_eq!(event.rows_cleared, 1);
        assert_eq!(event.clear_score, 200);
        assert!(!event.game_over);
        assert!(board.take_last_event().is_none());
    }

    #[test]
    fn test_rotation_kicks_right_near_left_wall() {
        let mut board = Board::new(1);
        // Vertical I in column 1, rows 4..=7
        let vertical = base_shape(PieceKind::I).rotated_cw();
        let shape = vertical.translated(5, 0);
        assert!(shape.points().iter().all(|p| p.col == 1));
        assert!(board.place_active(PieceKind::I, shape));

        // Unkicked result would reach column -1
        let rotated = shape.rotated_cw();
        assert!(board.check_collision(&rotated));
        assert!(board.rotate_piece());
        assert_eq!(board.active_shape(), Some(rotated.right()));
    }

    #[test]
    fn test_rotation_kick_order_prefers_left_over_down() {
        let mut board = Board::new(1);
        // T nub up, pivot at (10, 5)
        let shape = base_shape(PieceKind::T).translated(10, 4);
        assert!(board.place_active(PieceKind::T, shape));
        let rotated = shape.rotated_cw();

        // Block the plain rotation and the right kick
        board.set(Point::new(9, 5), Cell::Green);
        board.set(Point::new(9, 6), Cell::Green);
        assert!(board.check_collision(&rotated));
        assert!(board.check_collision(&rotated.right()));
        assert!(!board.check_collision(&rotated.left()));

        assert!(board.rotate_piece());
        assert_eq!(board.active_shape(), Some(rotated.left()));
    }

    #[test]
    fn test_rotation_falls_back_to_down_kick() {
        let mut board = Board::new(1);
        // Flat I in the top row: turning it upright pokes through the ceiling
        let shape = base_shape(PieceKind::I).translated(20, 3);
        assert!(board.place_active(PieceKind::I, shape));
        let rotated = shape.rotated_cw();

        assert!(board.check_collision(&rotated));
        assert!(board.check_collision(&rotated.right()));
        assert!(board.check_collision(&rotated.left()));
        assert!(!board.check_collision(&rotated.down()));

        assert!(board.rotate_piece());
        assert_eq!(board.active_shape(), Some(rotated.down()));
    }

    #[test]
    fn test_rotation_abandoned_when_every_kick_collides() {
        let mut board = Board::new(1);
        let shape = base_shape(PieceKind::I).translated(20, 3);
        assert!(board.place_active(PieceKind::I, shape));
        board.set(Point::new(18, 4), Cell::Blue);
        let before = board.cells();

        assert!(!board.rotate_piece());
        assert_eq!(board.active_shape(), Some(shape));
        assert_eq!(board.cells(), before);
    }

    #[test]
    fn test_ghost_rests_on_stack() {
        let mut board = Board::new(1);
        fill_row_except(&mut board, 0, Some(9));
        let shape = base_shape(PieceKind::O).translated(15, 2);
        assert!(board.place_active(PieceKind::O, shape));

        let ghost = board.ghost_shape().unwrap();
        assert_eq!(ghost, base_shape(PieceKind::O).translated(1, 2));
        // Read-only
        assert_eq!(board.active_shape(), Some(shape));
    }

    #[test]
    fn test_cells_composes_active_piece() {
        let mut board = Board::new(1);
        let shape = base_shape(PieceKind::S).translated(3, 3);
        assert!(board.place_active(PieceKind::S, shape));
        let cells = board.cells();
        for p in shape.points() {
            assert_eq!(cells[p.row as usize][p.col as usize], Cell::Green);
            assert_eq!(board.cell(*p), Some(Cell::Green));
        }
        let filled = cells.iter().flatten().filter(|c| !c.is_empty()).count();
        assert_eq!(filled, 4);
    }

    #[test]
    fn test_place_active_rejects_collision() {
        let mut board = Board::new(1);
        board.set(Point::new(0, 0), Cell::Red);
        let shape = base_shape(PieceKind::O);
        assert!(!board.place_active(PieceKind::O, shape));
        assert!(board.active().is_none());
    }
}
