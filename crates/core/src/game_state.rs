//! Game state module - the selection/placement controller
//!
//! This module ties together the tile arena, the board, both holding areas and
//! the dealing RNG. It interprets raw clicks against the current slot layout:
//! selecting, deselecting, moving and rotating tiles, and flashing the selected
//! tile when a move is invalid.

use tracing::{debug, info, warn};

use crate::board::{Board, Slot};
use crate::flash::Flash;
use crate::holding::HoldingArea;
use crate::rng::TileRng;
use crate::snapshot::{GameSnapshot, SlotSnapshot, TileSnapshot};
use crate::tile::{Tile, TileRecord};
use crate::types::*;

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing to do (blank clicked with no selection, or no such slot)
    Ignored,
    /// The tile became the selection
    Selected(TileKey),
    /// The selected tile was clicked again and released
    Deselected(TileKey),
    /// A different tile was clicked while one was selected; the selected
    /// tile flashes and nothing else changes
    InvalidMove { selected: TileKey, clicked: TileKey },
    /// The selected tile moved into a blank slot
    Moved {
        tile: TileKey,
        from: Location,
        to: Location,
    },
    /// The tile turned a quarter turn clockwise
    Rotated(TileKey),
}

/// A blank slot a selected tile can move into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Board(GridPos),
    Holding(AreaId, usize),
}

/// A click target resolved against the current layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolved {
    Tile(TileKey),
    Blank(Destination),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Tile arena, indexed by `TileKey`; key order is the deal order.
    tiles: Vec<Tile>,
    board: Board,
    holding: [HoldingArea; HOLDING_AREA_COUNT],
    selected: Option<TileKey>,
    flash: Option<Flash>,
    /// Records as dealt by the most recent new game, before any turns.
    initial_layout: Vec<TileRecord>,
    rng: TileRng,
    /// Monotonic game id (increments on new game).
    game_id: u32,
    revision: u32,
}

impl GameState {
    /// Create a game over `catalog` and deal it with a seeded RNG
    pub fn new(catalog: Vec<TileRecord>, seed: u64) -> Self {
        Self::with_rng(catalog, TileRng::new(seed))
    }

    /// Create a game over `catalog` and deal it with `rng`
    pub fn with_rng(catalog: Vec<TileRecord>, rng: TileRng) -> Self {
        let mut state = Self {
            tiles: Vec::new(),
            board: Board::new(),
            holding: AreaId::ALL.map(HoldingArea::new),
            selected: None,
            flash: None,
            initial_layout: Vec::new(),
            rng,
            game_id: 0,
            revision: 0,
        };
        state.deal(catalog);
        state
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn holding(&self, area: AreaId) -> &HoldingArea {
        &self.holding[area.index()]
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, key: TileKey) -> Option<&Tile> {
        self.tiles.get(key.index())
    }

    pub fn location(&self, key: TileKey) -> Option<Location> {
        self.tile(key).map(Tile::location)
    }

    pub fn selected(&self) -> Option<TileKey> {
        self.selected
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    pub fn initial_layout(&self) -> &[TileRecord] {
        &self.initial_layout
    }

    /// Redraw counter; changes whenever anything visible changes
    pub fn revision(&self) -> u32 {
        self.holding
            .iter()
            .fold(self.revision.wrapping_add(self.board.revision()), |acc, h| {
                acc.wrapping_add(h.revision())
            })
    }

    /// Reshuffle the current tile set and deal a fresh layout
    pub fn new_game(&mut self) {
        let records: Vec<TileRecord> = self
            .tiles
            .iter()
            .filter_map(|t| t.record().cloned())
            .collect();
        self.game_id = self.game_id.wrapping_add(1);
        self.deal(records);
    }

    /// Restore the layout dealt by the most recent new game
    pub fn reset(&mut self) {
        let records = self.initial_layout.clone();
        self.fill(records);
        info!(game_id = self.game_id, "game reset to initial layout");
    }

    /// Apply a menu intent; returns false for intents the shell must handle
    pub fn apply_intent(&mut self, intent: MenuIntent) -> bool {
        match intent {
            MenuIntent::NewGame => {
                self.new_game();
                true
            }
            MenuIntent::ResetGame => {
                self.reset();
                true
            }
            MenuIntent::Quit => false,
        }
    }

    /// Interpret a click against the current layout
    pub fn click(&mut self, click: Click) -> ClickOutcome {
        let Some(resolved) = self.resolve(click.target) else {
            warn!(?click, "click on a slot that does not exist");
            return ClickOutcome::Ignored;
        };

        let outcome = match (click.button, resolved) {
            (MouseButton::Secondary, Resolved::Tile(key)) => self.rotate_tile(key),
            (MouseButton::Secondary, Resolved::Blank(_)) => ClickOutcome::Ignored,
            (MouseButton::Primary, Resolved::Tile(key)) => self.select(key),
            (MouseButton::Primary, Resolved::Blank(dest)) => self.move_selected(dest),
        };

        debug_assert!(self.slots_consistent(), "slot invariant broken by {click:?}");
        outcome
    }

    /// Advance the invalid-move flash; returns true when a redraw is needed
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let Some(flash) = self.flash.as_mut() else {
            return false;
        };

        let changed = flash.advance(elapsed_ms);
        if flash.finished() {
            self.flash = None;
        }
        if changed {
            self.touch();
        }
        changed
    }

    /// Check that every drawn tile sits in exactly one slot and that its
    /// location tag names that slot.
    pub fn slots_consistent(&self) -> bool {
        let mut seen = vec![0u8; self.tiles.len()];
        let mut tagged = true;

        let mut visit = |slot: &Slot, at: Location| {
            if let Slot::Tile(key) = slot {
                match seen.get_mut(key.index()) {
                    Some(count) => *count += 1,
                    None => tagged = false,
                }
                if self.location(*key) != Some(at) {
                    tagged = false;
                }
            }
        };

        for (i, slot) in self.board.slots().iter().enumerate() {
            visit(slot, Location::Board(i));
        }
        for area in &self.holding {
            for (i, slot) in area.slots().iter().enumerate() {
                visit(slot, Location::Holding(area.id(), i));
            }
        }

        tagged && seen.iter().all(|&count| count == 1)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board.slots()) {
            *dst = self.slot_snapshot(*src);
        }
        for area in &self.holding {
            let dst = &mut out.holding[area.id().index()];
            dst.clear();
            dst.extend(area.slots().iter().map(|s| self.slot_snapshot(*s)));
        }
        out.selected = self.selected;
        out.flashing = self.flash.map(|f| f.target());
        out.game_id = self.game_id;
        out.seed = self.rng.seed();
        out.revision = self.revision();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn slot_snapshot(&self, slot: Slot) -> SlotSnapshot {
        let Slot::Tile(key) = slot else {
            return SlotSnapshot::Blank;
        };
        let tile = &self.tiles[key.index()];
        let (id, rotation) = tile
            .record()
            .map(|r| (r.id, r.rotation))
            .unwrap_or_default();
        SlotSnapshot::Tile(TileSnapshot {
            key,
            id,
            rotation,
            segments: tile.segments().to_vec(),
            selected: self.selected == Some(key),
            bordered: self
                .flash
                .is_some_and(|f| f.target() == key && f.bordered()),
        })
    }

    /// Shuffle, assign rotations, remember the result and fill the slots
    fn deal(&mut self, mut records: Vec<TileRecord>) {
        self.rng.deal(&mut records);
        self.initial_layout = records.clone();
        self.fill(records);
        info!(
            game_id = self.game_id,
            tiles = self.tiles.len(),
            seed = self.rng.seed(),
            "new game dealt"
        );
    }

    /// Clear the board and refill both holding areas from `records`:
    /// first half left, second half right, in order.
    fn fill(&mut self, records: Vec<TileRecord>) {
        self.selected = None;
        self.flash = None;
        self.board.clear();
        for area in &mut self.holding {
            area.clear();
        }

        let split = records.len().div_ceil(HOLDING_AREA_COUNT);
        self.tiles = Vec::with_capacity(records.len());
        for (i, record) in records.into_iter().enumerate() {
            let key = TileKey(i as u32);
            let area = if i < split { AreaId::Left } else { AreaId::Right };

            let mut tile = Tile::blank();
            tile.draw(record);
            let index = self.holding[area.index()].insert(key);
            tile.set_location(Location::Holding(area, index));
            self.tiles.push(tile);
        }
        self.touch();
    }

    fn resolve(&self, target: ClickTarget) -> Option<Resolved> {
        let resolved = match target {
            ClickTarget::Board(point) => {
                let pos = point.cell();
                match self.board.get(pos) {
                    Slot::Tile(key) => Resolved::Tile(key),
                    Slot::Blank => Resolved::Blank(Destination::Board(pos)),
                }
            }
            ClickTarget::Holding { area, index } => match self.holding(area).get(index)? {
                Slot::Tile(key) => Resolved::Tile(key),
                Slot::Blank => Resolved::Blank(Destination::Holding(area, index)),
            },
        };
        Some(resolved)
    }

    fn select(&mut self, key: TileKey) -> ClickOutcome {
        match self.selected {
            None => {
                self.selected = Some(key);
                self.touch();
                debug!(tile = key.0, "tile selected");
                ClickOutcome::Selected(key)
            }
            Some(current) if current == key => {
                self.selected = None;
                self.touch();
                debug!(tile = key.0, "tile deselected");
                ClickOutcome::Deselected(key)
            }
            Some(current) => {
                self.flash = Some(Flash::start(current));
                self.touch();
                debug!(selected = current.0, clicked = key.0, "invalid move");
                ClickOutcome::InvalidMove {
                    selected: current,
                    clicked: key,
                }
            }
        }
    }

    fn move_selected(&mut self, dest: Destination) -> ClickOutcome {
        let Some(key) = self.selected else {
            return ClickOutcome::Ignored;
        };

        let from = self.tiles[key.index()].location();
        match from {
            Location::Board(_) => {
                self.board.remove(key);
            }
            Location::Holding(area, _) => {
                self.holding[area.index()].remove_with_blank(key);
            }
            Location::Unplaced => {}
        }

        let to = match dest {
            Destination::Board(pos) => {
                let displaced = self.board.place(key, pos);
                assert!(displaced.is_blank(), "board move overwrote {displaced:?}");
                Location::Board(pos.index())
            }
            Destination::Holding(area, index) => {
                let displaced = self.holding[area.index()].replace(index, key);
                assert_eq!(displaced, Some(Slot::Blank), "holding move onto non-blank slot");
                Location::Holding(area, index)
            }
        };

        self.tiles[key.index()].set_location(to);
        self.selected = None;
        self.touch();
        debug!(tile = key.0, ?from, ?to, "tile moved");
        ClickOutcome::Moved { tile: key, from, to }
    }

    fn rotate_tile(&mut self, key: TileKey) -> ClickOutcome {
        if !self.tiles[key.index()].rotate() {
            return ClickOutcome::Ignored;
        }
        self.touch();
        debug!(tile = key.0, "tile rotated");
        ClickOutcome::Rotated(key)
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<TileRecord> {
        (0..TILE_COUNT as i32)
            .map(|id| {
                TileRecord::new(
                    100 + id,
                    vec![
                        Segment::new(0, id, 100, id),
                        Segment::new(id, 0, id, 50),
                    ],
                )
            })
            .collect()
    }

    fn holding(area: AreaId, index: usize) -> ClickTarget {
        ClickTarget::Holding { area, index }
    }

    fn board_px(x: u16, y: u16) -> ClickTarget {
        ClickTarget::Board(BoardPoint::new(x, y).unwrap())
    }

    fn key_at(state: &GameState, area: AreaId, index: usize) -> TileKey {
        state.holding(area).get(index).unwrap().tile().unwrap()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(catalog(), 12345);

        assert_eq!(state.tiles().len(), 16);
        assert_eq!(state.holding(AreaId::Left).len(), 8);
        assert_eq!(state.holding(AreaId::Right).len(), 8);
        assert!(state.board().occupied().is_empty());
        assert!(state.selected().is_none());
        assert!(state.flash().is_none());
        assert_eq!(state.game_id(), 0);
        assert_eq!(state.seed(), 12345);
        assert!(state.slots_consistent());
    }

    #[test]
    fn test_fill_splits_in_deal_order() {
        let state = GameState::new(catalog(), 1);
        for i in 0..8 {
            assert_eq!(key_at(&state, AreaId::Left, i), TileKey(i as u32));
            assert_eq!(key_at(&state, AreaId::Right, i), TileKey(i as u32 + 8));
        }
    }

    #[test]
    fn test_tiles_are_drawn_with_assigned_turns() {
        let state = GameState::new(catalog(), 77);
        for (tile, dealt) in state.tiles().iter().zip(state.initial_layout()) {
            let mut expected = dealt.clone();
            for _ in 0..dealt.draw_turns() {
                expected.rotate();
            }
            assert!(!tile.is_blank());
            assert_eq!(tile.record(), Some(&expected));
        }
    }

    #[test]
    fn test_select_and_deselect() {
        let mut state = GameState::new(catalog(), 1);
        let a = key_at(&state, AreaId::Left, 0);

        let click = Click::primary(holding(AreaId::Left, 0));
        assert_eq!(state.click(click), ClickOutcome::Selected(a));
        assert_eq!(state.selected(), Some(a));

        assert_eq!(state.click(click), ClickOutcome::Deselected(a));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_invalid_move_flashes_selected_tile() {
        let mut state = GameState::new(catalog(), 1);
        let a = key_at(&state, AreaId::Left, 0);
        let b = key_at(&state, AreaId::Right, 3);

        state.click(Click::primary(holding(AreaId::Left, 0)));
        let board_before = state.board().clone();
        let outcome = state.click(Click::primary(holding(AreaId::Right, 3)));

        assert_eq!(
            outcome,
            ClickOutcome::InvalidMove {
                selected: a,
                clicked: b
            }
        );
        assert_eq!(state.selected(), Some(a));
        assert_eq!(state.flash().map(|f| f.target()), Some(a));
        assert_eq!(state.board(), &board_before);
        assert_eq!(state.location(a), Some(Location::Holding(AreaId::Left, 0)));
    }

    #[test]
    fn test_flash_runs_out_on_ticks() {
        let mut state = GameState::new(catalog(), 1);
        state.click(Click::primary(holding(AreaId::Left, 0)));
        state.click(Click::primary(holding(AreaId::Left, 1)));
        assert!(state.flash().is_some());

        let mut ticks = 0;
        while state.flash().is_some() {
            state.tick(TICK_MS);
            ticks += 1;
            assert!(ticks < 1000, "flash never stopped");
        }
        assert!(!state.tick(TICK_MS));
        // Selection survives the flash.
        assert!(state.selected().is_some());
    }

    #[test]
    fn test_blank_click_without_selection_is_noop() {
        let mut state = GameState::new(catalog(), 1);
        let before = state.revision();
        assert_eq!(
            state.click(Click::primary(board_px(10, 10))),
            ClickOutcome::Ignored
        );
        assert_eq!(state.revision(), before);
    }

    #[test]
    fn test_move_holding_to_board() {
        let mut state = GameState::new(catalog(), 1);
        let a = key_at(&state, AreaId::Left, 2);

        state.click(Click::primary(holding(AreaId::Left, 2)));
        let outcome = state.click(Click::primary(board_px(250, 150)));

        assert_eq!(
            outcome,
            ClickOutcome::Moved {
                tile: a,
                from: Location::Holding(AreaId::Left, 2),
                to: Location::Board(6),
            }
        );
        assert_eq!(state.board().slots()[6], Slot::Tile(a));
        assert_eq!(state.holding(AreaId::Left).get(2), Some(Slot::Blank));
        assert_eq!(state.holding(AreaId::Left).len(), 8);
        assert_eq!(state.selected(), None);
        assert!(state.slots_consistent());
    }

    #[test]
    fn test_move_board_to_board_and_back_to_holding() {
        let mut state = GameState::new(catalog(), 1);
        let a = key_at(&state, AreaId::Right, 0);

        state.click(Click::primary(holding(AreaId::Right, 0)));
        state.click(Click::primary(board_px(0, 0)));

        // Clicking the occupied cell selects the tile sitting there.
        assert_eq!(
            state.click(Click::primary(board_px(50, 50))),
            ClickOutcome::Selected(a)
        );
        state.click(Click::primary(board_px(399, 399)));
        assert_eq!(state.location(a), Some(Location::Board(15)));
        assert_eq!(state.board().slots()[0], Slot::Blank);

        // Send it back to the blank it left in the right area.
        state.click(Click::primary(board_px(399, 399)));
        state.click(Click::primary(holding(AreaId::Right, 0)));
        assert_eq!(state.location(a), Some(Location::Holding(AreaId::Right, 0)));
        assert!(state.board().occupied().is_empty());
        assert!(state.slots_consistent());
    }

    #[test]
    fn test_move_between_holding_areas() {
        let mut state = GameState::new(catalog(), 1);
        let a = key_at(&state, AreaId::Left, 0);
        let b = key_at(&state, AreaId::Right, 5);

        // Open a blank in the right area by moving b onto the board.
        state.click(Click::primary(holding(AreaId::Right, 5)));
        state.click(Click::primary(board_px(120, 320)));
        assert_eq!(state.location(b), Some(Location::Board(13)));

        state.click(Click::primary(holding(AreaId::Left, 0)));
        state.click(Click::primary(holding(AreaId::Right, 5)));

        assert_eq!(state.location(a), Some(Location::Holding(AreaId::Right, 5)));
        assert_eq!(state.holding(AreaId::Left).get(0), Some(Slot::Blank));
        assert!(state.slots_consistent());
    }

    #[test]
    fn test_secondary_click_rotates_without_touching_selection() {
        let mut state = GameState::new(catalog(), 1);
        let a = key_at(&state, AreaId::Left, 0);
        let b = key_at(&state, AreaId::Left, 1);

        state.click(Click::primary(holding(AreaId::Left, 0)));
        let before = state.tile(b).unwrap().record().unwrap().clone();

        assert_eq!(
            state.click(Click::secondary(holding(AreaId::Left, 1))),
            ClickOutcome::Rotated(b)
        );
        let mut expected = before;
        expected.rotate();
        assert_eq!(state.tile(b).unwrap().record(), Some(&expected));
        assert_eq!(state.selected(), Some(a));
        assert!(state.flash().is_none());
    }

    #[test]
    fn test_secondary_click_on_blank_is_ignored() {
        let mut state = GameState::new(catalog(), 1);
        assert_eq!(
            state.click(Click::secondary(board_px(0, 0))),
            ClickOutcome::Ignored
        );
    }

    #[test]
    fn test_missing_holding_slot_is_ignored() {
        let mut state = GameState::new(catalog(), 1);
        assert_eq!(
            state.click(Click::primary(holding(AreaId::Left, 99))),
            ClickOutcome::Ignored
        );
    }

    #[test]
    fn test_reset_restores_initial_layout() {
        let mut state = GameState::new(catalog(), 5);
        let dealt = state.snapshot();

        state.click(Click::primary(holding(AreaId::Left, 0)));
        state.click(Click::primary(board_px(0, 0)));
        state.click(Click::secondary(board_px(0, 0)));
        state.click(Click::secondary(holding(AreaId::Right, 7)));

        state.reset();
        let restored = state.snapshot();
        assert_eq!(restored.board, dealt.board);
        assert_eq!(restored.holding, dealt.holding);
        assert!(state.board().occupied().is_empty());
    }

    #[test]
    fn test_new_game_increments_game_id_and_replaces_snapshot() {
        let mut state = GameState::new(catalog(), 5);
        let first_layout = state.initial_layout().to_vec();

        assert!(state.apply_intent(MenuIntent::NewGame));
        assert_eq!(state.game_id(), 1);
        assert_eq!(state.tiles().len(), 16);
        assert_ne!(state.initial_layout(), first_layout.as_slice());

        let dealt = state.snapshot();
        state.click(Click::secondary(holding(AreaId::Left, 3)));
        assert!(state.apply_intent(MenuIntent::ResetGame));
        assert_eq!(state.snapshot().holding, dealt.holding);
    }

    #[test]
    fn test_quit_is_left_to_the_shell() {
        let mut state = GameState::new(catalog(), 5);
        let before = state.revision();
        assert!(!state.apply_intent(MenuIntent::Quit));
        assert_eq!(state.revision(), before);
    }

    #[test]
    fn test_new_game_clears_selection_and_flash() {
        let mut state = GameState::new(catalog(), 5);
        state.click(Click::primary(holding(AreaId::Left, 0)));
        state.click(Click::primary(holding(AreaId::Left, 1)));
        state.new_game();
        assert!(state.selected().is_none());
        assert!(state.flash().is_none());
    }

    #[test]
    fn test_snapshot_marks_selection() {
        let mut state = GameState::new(catalog(), 5);
        state.click(Click::primary(holding(AreaId::Right, 2)));
        let snap = state.snapshot();
        let tile = snap.holding[AreaId::Right.index()][2].tile().unwrap();
        assert!(tile.selected);
        assert!(!tile.bordered);
        assert_eq!(snap.tile_count(), 16);
    }

    #[test]
    fn test_empty_catalog() {
        let mut state = GameState::new(Vec::new(), 5);
        assert!(state.tiles().is_empty());
        assert!(state.holding(AreaId::Left).is_empty());
        assert_eq!(
            state.click(Click::primary(board_px(0, 0))),
            ClickOutcome::Ignored
        );
        state.new_game();
        state.reset();
        assert!(state.slots_consistent());
    }
}
