use crate::board::{ActivePiece, CellRows};
use crate::pieces::Point;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: Cell,
    pub points: [Point; 4],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            color: value.color(),
            points: *value.shape.points(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimersSnapshot {
    pub gravity_secs: f64,
    pub gravity_interval_secs: f64,
    pub level_secs: f64,
}

/// Everything a renderer needs for one frame
///
/// `cells` is the composed view: locked cells with the falling piece on top.
/// The ghost is kept separate so a renderer can draw it only on empty cells.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub cells: CellRows,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<[Point; 4]>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
    pub seed: u32,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    /// Ghost cells that would be visible, i.e. not covered by anything
    pub fn visible_ghost(&self) -> impl Iterator<Item = Point> + '_ {
        self.ghost
            .iter()
            .flatten()
            .copied()
            .filter(|p| self.cells[p.row as usize][p.col as usize].is_empty())
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            next: PieceKind::I,
            score: 0,
            level: 0,
            paused: false,
            game_over: false,
            seed: 0,
            timers: TimersSnapshot::default(),
        }
    }
}
