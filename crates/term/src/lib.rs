//! Terminal "game renderer" module.
//!
//! This is a small rendering layer for terminal play. It avoids widget
//! libraries and instead renders into a simple framebuffer that can be
//! flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Own the screen layout in one place so drawing and hit testing agree
//! - Allow precise control over tile aspect ratio (e.g. 8x4 cells per tile)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_maze_core as core;
pub use tui_maze_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Hit, Layout, Rect, Viewport, MAX_TILE_SIDE};
pub use renderer::{encode_diff_into, encode_full_into, DirtyRuns, Run, TerminalRenderer};
