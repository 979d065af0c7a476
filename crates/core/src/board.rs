//! Board module - the 4x4 placement grid
//!
//! The board is a fixed array of 16 slots in row-major order (`y * 4 + x`).
//! Every slot holds a tile key or a blank. Every mutation bumps the board's
//! revision, which the renderer uses as its redraw signal.

use arrayvec::ArrayVec;

use crate::types::{GridPos, TileKey, BOARD_CELLS};

/// One addressable position on the board or in a holding area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slot {
    #[default]
    Blank,
    Tile(TileKey),
}

impl Slot {
    pub fn is_blank(&self) -> bool {
        matches!(self, Slot::Blank)
    }

    pub fn tile(&self) -> Option<TileKey> {
        match self {
            Slot::Tile(key) => Some(*key),
            Slot::Blank => None,
        }
    }
}

/// The game board - 16 slots using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of slots, row-major order (y * 4 + x)
    slots: [Slot; BOARD_CELLS],
    revision: u32,
}

impl Board {
    /// Create a new board with every slot blank
    pub fn new() -> Self {
        Self {
            slots: [Slot::Blank; BOARD_CELLS],
            revision: 0,
        }
    }

    /// Reset every slot to blank
    pub fn clear(&mut self) {
        self.slots.fill(Slot::Blank);
        self.touch();
    }

    /// Put `tile` at `pos`, first vacating any other cell it occupies.
    ///
    /// The target is overwritten unconditionally; whatever sat there is
    /// returned so the caller can rehome it.
    pub fn place(&mut self, tile: TileKey, pos: GridPos) -> Slot {
        if let Some(old) = self.position_of(tile) {
            self.slots[old] = Slot::Blank;
        }
        let displaced = std::mem::replace(&mut self.slots[pos.index()], Slot::Tile(tile));
        self.touch();
        displaced
    }

    /// Replace `tile` with a blank, returning the cell it left.
    ///
    /// A tile that is not on the board is a no-op.
    pub fn remove(&mut self, tile: TileKey) -> Option<usize> {
        let index = self.position_of(tile)?;
        self.slots[index] = Slot::Blank;
        self.touch();
        Some(index)
    }

    /// Get the slot at `pos`
    pub fn get(&self, pos: GridPos) -> Slot {
        self.slots[pos.index()]
    }

    /// Check if the cell at `pos` is blank
    pub fn is_blank(&self, pos: GridPos) -> bool {
        self.get(pos).is_blank()
    }

    /// Row-major index of the cell holding `tile`
    pub fn position_of(&self, tile: TileKey) -> Option<usize> {
        self.slots.iter().position(|s| *s == Slot::Tile(tile))
    }

    /// Occupied cells as `(index, tile)` pairs, in row-major order
    pub fn occupied(&self) -> ArrayVec<(usize, TileKey), BOARD_CELLS> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.tile().map(|key| (i, key)))
            .collect()
    }

    /// Get a reference to the internal slot array
    pub fn slots(&self) -> &[Slot; BOARD_CELLS] {
        &self.slots
    }

    /// Redraw counter, bumped by every mutation
    pub fn revision(&self) -> u32 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
