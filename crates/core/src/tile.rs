//! Tile module - per-tile maze geometry and the quarter-turn transform
//!
//! A [`TileRecord`] is the decoded catalog entry: an id, its line segments and
//! the rotation value assigned by the last deal. A [`Tile`] is the arena entry
//! the game state owns; it starts blank and becomes drawable once a record is
//! drawn onto it.

use crate::types::{Location, Segment};

/// Decoded geometry for one physical tile
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileRecord {
    pub id: i32,
    pub segments: Vec<Segment>,
    /// Assigned rotation value in `0..=3`; drawing applies `rotation + 1` turns
    pub rotation: u8,
}

impl TileRecord {
    pub fn new(id: i32, segments: Vec<Segment>) -> Self {
        Self {
            id,
            segments,
            rotation: 0,
        }
    }

    pub fn line_count(&self) -> usize {
        self.segments.len()
    }

    /// Rotate every segment 90° clockwise in place
    pub fn rotate(&mut self) {
        for segment in &mut self.segments {
            *segment = segment.rotated_cw();
        }
    }

    /// Number of quarter turns applied when this record is first drawn.
    ///
    /// Rotation 3 yields four turns, which is the identity.
    pub fn draw_turns(&self) -> u8 {
        (self.rotation % 4) + 1
    }
}

/// An arena slot for one tile: its drawn geometry and where it sits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    record: Option<TileRecord>,
    location: Location,
}

impl Tile {
    /// A tile that has never been drawn
    pub fn blank() -> Self {
        Self {
            record: None,
            location: Location::Unplaced,
        }
    }

    /// Draw `record` onto this tile, applying its assigned quarter turns
    pub fn draw(&mut self, mut record: TileRecord) {
        for _ in 0..record.draw_turns() {
            record.rotate();
        }
        self.record = Some(record);
    }

    /// A tile is blank until a record has been drawn onto it
    pub fn is_blank(&self) -> bool {
        self.record.is_none()
    }

    pub fn record(&self) -> Option<&TileRecord> {
        self.record.as_ref()
    }

    pub fn segments(&self) -> &[Segment] {
        self.record
            .as_ref()
            .map(|r| r.segments.as_slice())
            .unwrap_or(&[])
    }

    /// Rotate the drawn geometry by one quarter turn.
    ///
    /// Returns false for a blank tile, which has nothing to rotate.
    pub fn rotate(&mut self) -> bool {
        match self.record.as_mut() {
            Some(record) => {
                record.rotate();
                true
            }
            None => false,
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = location;
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::blank()
    }
}
