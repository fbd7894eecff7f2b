//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders a `GameSnapshot` into a simple framebuffer using a text tile
//! sheet, then flushes only the changed runs to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Provide a rendering pipeline that feels closer to a game renderer
//! - Keep board cells square (tiles are 2 columns wide per row)

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod sheet;

pub use tetris_core as core;
pub use tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{cell_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sheet::{BlockSheet, EMPTY_TILE, PREVIEW_TILE_OFFSET, SHEET_COLS, SHEET_ROWS, TILE_COUNT};
