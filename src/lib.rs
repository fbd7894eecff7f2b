//! Terminal Tetris (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tetris::{core,input,term,types}`.

pub use tetris_core as core;
pub use tetris_input as input;
pub use tetris_term as term;
pub use tetris_types as types;
