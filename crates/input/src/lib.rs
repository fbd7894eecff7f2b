//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! and mouse events into [`crate::types::Intent`]s and tracks held keys so
//! the session sees moves every frame while a key is down.

pub mod handler;
pub mod map;

pub use tetris_types as types;

pub use handler::{HorizontalDirection, InputHandler};
pub use map::{is_pause_click, map_key_code, should_quit, Control};
