//! Terminal input module.
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::MenuIntent`] and mouse events into terminal-cell
//! [`Pointer`]s; the renderer's hit test turns pointers into clicks.

pub mod map;
pub mod mouse;

pub use tui_maze_types as types;

pub use map::{handle_key_event, should_quit};
pub use mouse::{handle_mouse_event, Pointer};
