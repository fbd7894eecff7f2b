//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and the timing controller that
//! drives them. It has **zero dependencies** on UI or I/O:
//!
//! - **Deterministic**: the same seed produces the same pieces and spawn columns
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: runs in a terminal, a GUI or headless
//!
//! # Module Structure
//!
//! - [`grid`]: 22x10 locked-cell storage
//! - [`pieces`]: points, shapes, base geometry and clockwise rotation
//! - [`board`]: spawn, collision, movement, rotation with kicks, gravity, row clears
//! - [`rng`]: uniform piece and spawn-column selection
//! - [`scoring`]: row clear and combo points
//! - [`session`]: gravity timer, soft drop, repeat delay, levels, pause
//! - [`snapshot`]: render-ready copy of the state
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: any kind can follow any other
//! - **Simple kicks**: a blocked rotation tries one cell right, left, then down
//! - **Cascading clears**: deleted rows can expose more full rows in the same lock
//! - **Scoring**: 200 per row, 200 more for each extra row in one lock,
//!   10 per locked piece, 12 per hard drop
//! - **Speed**: gravity starts at 0.8s and shrinks by 0.1s every minute, down to 0.2s
//!
//! # Example
//!
//! ```
//! use tetris_core::Session;
//! use tetris_types::Intent;
//!
//! let mut session = Session::new(12345);
//!
//! session.apply(Intent::MoveRight);
//! session.apply(Intent::RotateCw);
//! session.apply(Intent::HardDrop);
//! session.tick(1.0 / 60.0);
//!
//! assert!(session.score() >= 12);
//! ```

pub mod board;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{ActivePiece, Board, CellRows, Direction, LockEvent};
pub use grid::Grid;
pub use pieces::{base_shape, spawn_columns, Point, Shape};
pub use rng::SimpleRng;
pub use scoring::{calculate_clear_score, ClearScore};
pub use session::{RunState, Session, SessionConfig, TickOutcome};
pub use snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
