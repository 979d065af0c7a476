//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Geometry
//!
//! - **Board**: 4x4 grid of cells, row-major (`index = y * 4 + x`)
//! - **Tile extent**: every tile spans local coordinates `[0, 100] x [0, 100]`
//! - **Board pixels**: the board is addressed in a 400x400 pixel space, so a
//!   board pixel maps to its cell by integer division by 100
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval of the shell loop |
//! | `FLASH_INTERVAL_MS` | 80 | Interval between invalid-move flash toggles |
//! | `FLASH_TICKS` | 8 | Flash toggles before the flash stops itself |
//!
//! # Examples
//!
//! ```
//! use tui_maze_types::{BoardPoint, GridPos, MenuIntent, BOARD_SIDE};
//!
//! // Board pixels map onto cells by truncating division.
//! let point = BoardPoint::new(250, 150).unwrap();
//! assert_eq!(point.cell(), GridPos::new(2, 1).unwrap());
//!
//! // Out-of-range coordinates are rejected at the boundary.
//! assert!(GridPos::new(BOARD_SIDE, 0).is_none());
//!
//! // Menu buttons are captioned by their intent.
//! assert_eq!(MenuIntent::NewGame.label(), "New Game");
//! ```

/// Board side length in cells (4 columns, 4 rows)
pub const BOARD_SIDE: u8 = 4;

/// Number of cells on the board
pub const BOARD_CELLS: usize = (BOARD_SIDE as usize) * (BOARD_SIDE as usize);

/// Side length of a tile in local geometry units
pub const TILE_EXTENT: i32 = 100;

/// Side length of the board in board pixels (4 tiles of 100)
pub const BOARD_PIXELS: u16 = (BOARD_SIDE as u16) * (TILE_EXTENT as u16);

/// Number of tiles in a full game
pub const TILE_COUNT: usize = 16;

/// Number of holding areas flanking the board
pub const HOLDING_AREA_COUNT: usize = 2;

/// Fixed timestep interval in milliseconds for the shell loop
pub const TICK_MS: u32 = 16;

/// Interval between invalid-move flash toggles
pub const FLASH_INTERVAL_MS: u32 = 80;

/// Number of flash ticks; the last tick clears the border and stops the flash
pub const FLASH_TICKS: u8 = 8;

/// Most tiles that may be assigned rotation 3 in a new game
pub const MAX_UNTURNED_TILES: usize = 4;


/// One line of a tile's maze drawing, in tile-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Segment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Segment {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a segment from raw catalog floats, truncating each toward zero
    pub fn from_f32(coords: [f32; 4]) -> Self {
        Self {
            x1: coords[0] as i32,
            y1: coords[1] as i32,
            x2: coords[2] as i32,
            y2: coords[3] as i32,
        }
    }

    /// Rotate 90° clockwise about the center of a 100x100 tile.
    ///
    /// Uses `(x, y) -> (-y + 100, x)`, which folds translate, rotate and
    /// translate-back into one step and is only valid for the 100-unit tile.
    /// Arithmetic wraps, so four turns are the identity for every `i32`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_maze_types::Segment;
    ///
    /// let s = Segment::new(0, 0, 100, 100).rotated_cw();
    /// assert_eq!(s, Segment::new(100, 0, 0, 100));
    /// ```
    pub fn rotated_cw(&self) -> Self {
        Self {
            x1: self.y1.wrapping_neg().wrapping_add(TILE_EXTENT),
            y1: self.x1,
            x2: self.y2.wrapping_neg().wrapping_add(TILE_EXTENT),
            y2: self.x2,
        }
    }
}

/// Stable identity of a tile for the lifetime of a game session.
///
/// Keys index the tile arena owned by the game state; they are independent of
/// catalog ids, which are not guaranteed to be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey(pub u32);

impl TileKey {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The two holding areas flanking the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaId {
    Left,
    Right,
}

impl AreaId {
    pub const ALL: [AreaId; HOLDING_AREA_COUNT] = [AreaId::Left, AreaId::Right];

    pub fn index(self) -> usize {
        match self {
            AreaId::Left => 0,
            AreaId::Right => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaId::Left => "left",
            AreaId::Right => "right",
        }
    }
}

/// A validated board cell coordinate (`0 <= x, y < 4`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    x: u8,
    y: u8,
}

impl GridPos {
    /// Returns `None` when either coordinate is off the board
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if x >= BOARD_SIDE || y >= BOARD_SIDE {
            return None;
        }
        Some(Self { x, y })
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    /// Row-major flat index (`y * 4 + x`)
    #[inline(always)]
    pub fn index(&self) -> usize {
        (self.y as usize) * (BOARD_SIDE as usize) + (self.x as usize)
    }
}

/// A validated point in board pixel space (`0 <= x, y < 400`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardPoint {
    x: u16,
    y: u16,
}

impl BoardPoint {
    pub fn new(x: u16, y: u16) -> Option<Self> {
        if x >= BOARD_PIXELS || y >= BOARD_PIXELS {
            return None;
        }
        Some(Self { x, y })
    }

    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }

    /// The cell under this point (pixel / 100, truncated)
    pub fn cell(&self) -> GridPos {
        let extent = TILE_EXTENT as u16;
        GridPos {
            x: (self.x / extent) as u8,
            y: (self.y / extent) as u8,
        }
    }
}

/// Where a tile currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Board cell, by row-major index
    Board(usize),
    /// Holding area slot, by area and row index
    Holding(AreaId, usize),
    /// Not in any slot (before the initial fill)
    Unplaced,
}

/// Mouse buttons the controller distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Select / deselect / move
    Primary,
    /// Rotate in place
    Secondary,
}

/// The source of a click event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A point on the board, in board pixels
    Board(BoardPoint),
    /// A holding area slot
    Holding { area: AreaId, index: usize },
}

/// A raw click forwarded by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    pub target: ClickTarget,
    pub button: MouseButton,
}

impl Click {
    pub fn primary(target: ClickTarget) -> Self {
        Self {
            target,
            button: MouseButton::Primary,
        }
    }

    pub fn secondary(target: ClickTarget) -> Self {
        Self {
            target,
            button: MouseButton::Secondary,
        }
    }
}

/// Menu intents sent by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIntent {
    /// Reshuffle and deal a fresh layout
    NewGame,
    /// Restore the layout dealt by the most recent new game
    ResetGame,
    /// Leave the program
    Quit,
}

impl MenuIntent {
    pub const ALL: [MenuIntent; 3] = [MenuIntent::NewGame, MenuIntent::ResetGame, MenuIntent::Quit];

    /// Button caption shown by the shell
    pub fn label(&self) -> &'static str {
        match self {
            MenuIntent::NewGame => "New Game",
            MenuIntent::ResetGame => "Reset",
            MenuIntent::Quit => "Quit",
        }
    }
}
