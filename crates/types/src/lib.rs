//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no I/O, usable from the engine, the terminal
//! view and tests alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 22 rows (indexed 0-21, bottom to top)
//! - **Visible**: rows 0-19; rows 20 and 21 are the spawn buffer
//!
//! # Game Timing Constants
//!
//! Timing values are in seconds (`f64`), matching the frame delta fed to
//! the session:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_GRAVITY_SECS` | 0.8 | Gravity interval at the start of a game |
//! | `MIN_GRAVITY_SECS` | 0.2 | Fastest base gravity interval |
//! | `SPEED_UP_STEP_SECS` | 0.1 | Interval reduction per level |
//! | `LEVEL_LENGTH_SECS` | 60 | Time spent on each level |
//! | `SOFT_DROP_GRAVITY_SECS` | 0.08 | Gravity interval while soft dropping |
//! | `MOVE_FIRST_REPEAT_SECS` | 0.5 | Delay before a held move repeats |
//! | `MOVE_REPEAT_SECS` | 0.1 | Delay between subsequent repeats |
//!
//! # Examples
//!
//! ```
//! use tetris_types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.color(), Cell::Purple);
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert!(Cell::Ghost.tile_index().is_some());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells, including the two buffer rows (22 rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Rows shown to the player (rows 0-19)
pub const VISIBLE_HEIGHT: u8 = 20;

/// Base row of a freshly spawned piece
pub const SPAWN_ROW: i8 = 20;

/// Gravity interval at level 0
pub const BASE_GRAVITY_SECS: f64 = 0.8;

/// Floor for the base gravity interval
pub const MIN_GRAVITY_SECS: f64 = 0.2;

/// Amount the base gravity interval shrinks per level
pub const SPEED_UP_STEP_SECS: f64 = 0.1;

/// Time before the game speeds up
pub const LEVEL_LENGTH_SECS: f64 = 60.0;

/// Gravity interval while soft drop is held
pub const SOFT_DROP_GRAVITY_SECS: f64 = 0.08;

/// Delay after the first horizontal move of a hold
pub const MOVE_FIRST_REPEAT_SECS: f64 = 0.5;

/// Delay between repeated horizontal moves once repeating
pub const MOVE_REPEAT_SECS: f64 = 0.1;

/// Points for each locked piece
pub const LOCK_SCORE: u32 = 10;

/// Flat bonus for a hard drop
pub const HARD_DROP_SCORE: u32 = 12;

/// Points per cleared row, also the per-row combo bonus
pub const ROW_CLEAR_SCORE: u32 = 200;

/// The seven tetromino piece kinds
///
/// Each kind has exactly one color, see [`PieceKind::color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in draw-index order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Color used to fill cells of this kind
    ///
    /// ```
    /// use tetris_types::{Cell, PieceKind};
    ///
    /// assert_eq!(PieceKind::I.color(), Cell::Cyan);
    /// assert_eq!(PieceKind::O.color(), Cell::Yellow);
    /// ```
    pub fn color(self) -> Cell {
        match self {
            PieceKind::I => Cell::Cyan,
            PieceKind::J => Cell::Blue,
            PieceKind::L => Cell::Orange,
            PieceKind::O => Cell::Yellow,
            PieceKind::S => Cell::Green,
            PieceKind::T => Cell::Purple,
            PieceKind::Z => Cell::Red,
        }
    }
}

/// A cell on the game board
///
/// Either `Empty` or one of the piece colors. `Ghost` is never stored in the
/// board; renderers use it for the landing preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
    Ghost,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Index into a block tile sheet (`None` for `Empty`)
    ///
    /// ```
    /// use tetris_types::Cell;
    ///
    /// assert_eq!(Cell::Empty.tile_index(), None);
    /// assert_eq!(Cell::Cyan.tile_index(), Some(0));
    /// assert_eq!(Cell::Ghost.tile_index(), Some(7));
    /// ```
    pub fn tile_index(self) -> Option<usize> {
        match self {
            Cell::Empty => None,
            Cell::Cyan => Some(0),
            Cell::Blue => Some(1),
            Cell::Orange => Some(2),
            Cell::Yellow => Some(3),
            Cell::Green => Some(4),
            Cell::Purple => Some(5),
            Cell::Red => Some(6),
            Cell::Ghost => Some(7),
        }
    }
}

/// Player intents forwarded to the session
///
/// Each intent is a discrete event without parameters. Horizontal moves are
/// sent every frame while held; the session applies its own repeat delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Intent {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// No horizontal key is held any more
    ReleaseHorizontal,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Start fast gravity
    SoftDropStart,
    /// Restore normal gravity
    SoftDropEnd,
    /// Drop and lock the piece immediately
    HardDrop,
    /// Pause or resume
    TogglePause,
}
