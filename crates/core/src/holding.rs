//! Holding area module - ordered slot lists flanking the board
//!
//! A holding area grows only during the initial fill. Afterwards its length is
//! fixed: a tile leaving a slot is replaced by a blank at the same index, so
//! the on-screen layout never shifts.

use crate::board::Slot;
use crate::types::{AreaId, TileKey};

#[derive(Debug, Clone, PartialEq)]
pub struct HoldingArea {
    id: AreaId,
    slots: Vec<Slot>,
    revision: u32,
}

impl HoldingArea {
    pub fn new(id: AreaId) -> Self {
        Self {
            id,
            slots: Vec::new(),
            revision: 0,
        }
    }

    pub fn id(&self) -> AreaId {
        self.id
    }

    /// Append a tile; used by the initial fill only
    pub fn insert(&mut self, tile: TileKey) -> usize {
        self.slots.push(Slot::Tile(tile));
        self.touch();
        self.slots.len() - 1
    }

    /// Drop every slot ahead of a refill
    pub fn clear(&mut self) {
        self.slots.clear();
        self.touch();
    }

    /// Replace `tile` with a blank at the same index.
    ///
    /// Returns the index it left, or `None` (and changes nothing) when the
    /// tile is not held here.
    pub fn remove_with_blank(&mut self, tile: TileKey) -> Option<usize> {
        let index = self.position_of(tile)?;
        self.slots[index] = Slot::Blank;
        self.touch();
        Some(index)
    }

    /// Put `tile` into the slot at `index`, returning its previous occupant.
    ///
    /// Blanks carry no identity, so the slot is addressed by index. Returns
    /// `None` without changes when `index` is out of range.
    pub fn replace(&mut self, index: usize, tile: TileKey) -> Option<Slot> {
        let slot = self.slots.get_mut(index)?;
        let displaced = std::mem::replace(slot, Slot::Tile(tile));
        self.touch();
        Some(displaced)
    }

    pub fn get(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    pub fn position_of(&self, tile: TileKey) -> Option<usize> {
        self.slots.iter().position(|s| *s == Slot::Tile(tile))
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: u32) -> HoldingArea {
        let mut area = HoldingArea::new(AreaId::Left);
        for k in 0..n {
            area.insert(TileKey(k));
        }
        area
    }

    #[test]
    fn test_insert_appends_in_order() {
        let area = filled(8);
        assert_eq!(area.len(), 8);
        for (i, slot) in area.slots().iter().enumerate() {
            assert_eq!(*slot, Slot::Tile(TileKey(i as u32)));
        }
    }

    #[test]
    fn test_remove_with_blank_keeps_indices() {
        let mut area = filled(8);
        assert_eq!(area.remove_with_blank(TileKey(3)), Some(3));
        assert_eq!(area.len(), 8);
        assert_eq!(area.get(3), Some(Slot::Blank));
        assert_eq!(area.get(4), Some(Slot::Tile(TileKey(4))));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut area = filled(2);
        let before = area.clone();
        assert_eq!(area.remove_with_blank(TileKey(7)), None);
        assert_eq!(area, before);
    }

    #[test]
    fn test_replace_at_index() {
        let mut area = filled(4);
        area.remove_with_blank(TileKey(1));
        assert_eq!(area.replace(1, TileKey(9)), Some(Slot::Blank));
        assert_eq!(area.get(1), Some(Slot::Tile(TileKey(9))));
        assert_eq!(area.len(), 4);
    }

    #[test]
    fn test_replace_out_of_range() {
        let mut area = filled(2);
        let before = area.revision();
        assert_eq!(area.replace(2, TileKey(5)), None);
        assert_eq!(area.revision(), before);
    }

    #[test]
    fn test_clear_empties() {
        let mut area = filled(3);
        area.clear();
        assert!(area.is_empty());
    }
}
