//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the puzzle rules and all state management. It has no
//! dependencies on terminal rendering or input devices, making it:
//!
//! - **Deterministic**: Same seed and catalog produce identical deals
//! - **Testable**: Unit tests for every rule, plus property tests at the crate root
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`catalog`]: Binary tile catalog decoder (and encoder for fixtures)
//! - [`tile`]: Tile records, quarter-turn rotation and the drawn tile
//! - [`rng`]: Seeded shuffle and rotation assignment
//! - [`board`]: The 4x4 board of slots
//! - [`holding`]: The two holding areas flanking the board
//! - [`flash`]: The invalid-move border flash timer
//! - [`game_state`]: Selection/placement controller over all of the above
//! - [`snapshot`]: Plain-data view of the state for renderers
//!
//! # Game Rules
//!
//! - **Deal**: tiles are shuffled and stamped with rotations 0..=3; rotations
//!   0, 1 and 2 each appear at least once and rotation 3 at most four times
//! - **Fill**: the board starts blank; the first half of the deal fills the
//!   left holding area and the rest fills the right
//! - **Primary click**: select a tile, deselect it, or move it into a blank slot
//! - **Secondary click**: rotate a tile a quarter turn clockwise
//! - **Invalid move**: clicking another tile while one is selected flashes the
//!   selected tile with a border and changes nothing else
//!
//! # Example
//!
//! ```
//! use tui_maze_core::{GameState, TileRecord};
//! use tui_maze_core::types::{AreaId, BoardPoint, Click, ClickTarget, Segment};
//!
//! let catalog: Vec<TileRecord> = (0..16)
//!     .map(|id| TileRecord::new(id, vec![Segment::new(0, 50, 100, 50)]))
//!     .collect();
//! let mut game = GameState::new(catalog, 12345);
//!
//! // Select the first tile of the left holding area and drop it on the board.
//! game.click(Click::primary(ClickTarget::Holding { area: AreaId::Left, index: 0 }));
//! game.click(Click::primary(ClickTarget::Board(BoardPoint::new(250, 150).unwrap())));
//!
//! assert_eq!(game.board().occupied().len(), 1);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed time; it drives the invalid-move flash.

pub mod board;
pub mod catalog;
pub mod flash;
pub mod game_state;
pub mod holding;
pub mod rng;
pub mod snapshot;
pub mod tile;

pub use tui_maze_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Slot};
pub use catalog::CatalogError;
pub use flash::Flash;
pub use game_state::{ClickOutcome, GameState};
pub use holding::HoldingArea;
pub use rng::TileRng;
pub use snapshot::{GameSnapshot, SlotSnapshot, TileSnapshot};
pub use tile::{Tile, TileRecord};
