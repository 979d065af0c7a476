//! Integration tests for the selection/placement controller

use tui_maze::core::{ClickOutcome, GameState, Slot, TileRecord};
use tui_maze::types::{
    AreaId, BoardPoint, Click, ClickTarget, GridPos, Location, MenuIntent, Segment,
    FLASH_INTERVAL_MS, FLASH_TICKS, TICK_MS, TILE_COUNT,
};

fn catalog() -> Vec<TileRecord> {
    (0..TILE_COUNT as i32)
        .map(|id| {
            TileRecord::new(
                id * 10,
                vec![Segment::new(0, 0, 100, 0), Segment::new(0, 0, 0, id * 5)],
            )
        })
        .collect()
}

fn holding(area: AreaId, index: usize) -> ClickTarget {
    ClickTarget::Holding { area, index }
}

fn board(x: u16, y: u16) -> ClickTarget {
    ClickTarget::Board(BoardPoint::new(x, y).unwrap())
}

#[test]
fn test_same_seed_deals_same_layout() {
    let a = GameState::new(catalog(), 2024);
    let b = GameState::new(catalog(), 2024);
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.initial_layout(), b.initial_layout());
}

#[test]
fn test_deal_is_a_permutation_with_required_rotations() {
    let state = GameState::new(catalog(), 7);
    let mut ids: Vec<i32> = state.initial_layout().iter().map(|r| r.id).collect();
    ids.sort();
    let expected: Vec<i32> = (0..TILE_COUNT as i32).map(|id| id * 10).collect();
    assert_eq!(ids, expected);

    let rotations: Vec<u8> = state.initial_layout().iter().map(|r| r.rotation).collect();
    for r in 0..3 {
        assert!(rotations.contains(&r), "rotation {r} missing from {rotations:?}");
    }
    assert!(rotations.iter().filter(|&&r| r == 3).count() <= 4);
}

#[test]
fn test_full_move_cycle() {
    let mut state = GameState::new(catalog(), 1);
    let tile = state.holding(AreaId::Left).get(0).and_then(|s| s.tile()).unwrap();

    // Idle -> Selected
    assert_eq!(
        state.click(Click::primary(holding(AreaId::Left, 0))),
        ClickOutcome::Selected(tile)
    );

    // Selected -> move onto board pixel (250, 150), which is cell (2, 1)
    state.click(Click::primary(board(250, 150)));
    let cell = GridPos::new(2, 1).unwrap();
    assert_eq!(state.board().get(cell), Slot::Tile(tile));
    assert_eq!(state.location(tile), Some(Location::Board(cell.index())));
    assert_eq!(state.holding(AreaId::Left).get(0), Some(Slot::Blank));
    assert!(state.selected().is_none());

    // Rotate in place on the board with the secondary button.
    let before = state.tile(tile).unwrap().segments().to_vec();
    assert_eq!(
        state.click(Click::secondary(board(210, 110))),
        ClickOutcome::Rotated(tile)
    );
    let after = state.tile(tile).unwrap().segments();
    let expected: Vec<Segment> = before.iter().map(Segment::rotated_cw).collect();
    assert_eq!(after, expected.as_slice());

    assert!(state.slots_consistent());
}

#[test]
fn test_four_rotations_restore_geometry() {
    let mut state = GameState::new(catalog(), 3);
    let target = holding(AreaId::Right, 4);
    let key = state.holding(AreaId::Right).get(4).and_then(|s| s.tile()).unwrap();
    let before = state.tile(key).unwrap().segments().to_vec();

    for _ in 0..4 {
        state.click(Click::secondary(target));
    }
    assert_eq!(state.tile(key).unwrap().segments(), before.as_slice());
    // Turning the geometry leaves the dealt rotation value alone.
    assert_eq!(
        state.tile(key).unwrap().record().unwrap().rotation,
        state.initial_layout()[key.index()].rotation
    );
}

#[test]
fn test_invalid_move_flash_then_recover() {
    let mut state = GameState::new(catalog(), 11);
    state.click(Click::primary(holding(AreaId::Left, 3)));
    let outcome = state.click(Click::primary(holding(AreaId::Right, 3)));
    assert!(matches!(outcome, ClickOutcome::InvalidMove { .. }));

    // Run the flash to completion at the shell tick rate.
    let mut bordered_frames = 0;
    for _ in 0..(FLASH_TICKS as u32 * FLASH_INTERVAL_MS / TICK_MS + 2) {
        state.tick(TICK_MS);
        if state.flash().is_some_and(|f| f.bordered()) {
            bordered_frames += 1;
        }
    }
    assert!(state.flash().is_none());
    assert!(bordered_frames > 0);

    // The selection is still live and can complete a move.
    let outcome = state.click(Click::primary(board(0, 0)));
    assert!(matches!(outcome, ClickOutcome::Moved { .. }));
}

#[test]
fn test_reset_versus_new_game() {
    let mut state = GameState::new(catalog(), 99);
    let dealt = state.snapshot();

    state.click(Click::primary(holding(AreaId::Left, 0)));
    state.click(Click::primary(board(0, 0)));
    state.click(Click::secondary(board(0, 0)));

    state.apply_intent(MenuIntent::ResetGame);
    let reset = state.snapshot();
    assert_eq!(reset.board, dealt.board);
    assert_eq!(reset.holding, dealt.holding);
    assert_eq!(reset.game_id, dealt.game_id);

    state.apply_intent(MenuIntent::NewGame);
    let fresh = state.snapshot();
    assert_eq!(fresh.game_id, dealt.game_id + 1);
    assert_eq!(fresh.tile_count(), TILE_COUNT);
    assert!(fresh.board.iter().all(|s| s.is_blank()));

    // Reset now returns to the new deal, not the first one.
    state.click(Click::secondary(holding(AreaId::Right, 0)));
    state.apply_intent(MenuIntent::ResetGame);
    assert_eq!(state.snapshot().holding, fresh.holding);
}

#[test]
fn test_every_tile_can_reach_the_board() {
    let mut state = GameState::new(catalog(), 5);
    let mut cell = 0u16;
    for area in AreaId::ALL {
        for index in 0..state.holding(area).len() {
            state.click(Click::primary(holding(area, index)));
            let (x, y) = (cell % 4, cell / 4);
            let outcome = state.click(Click::primary(board(x * 100 + 50, y * 100 + 50)));
            assert!(matches!(outcome, ClickOutcome::Moved { .. }), "{outcome:?}");
            cell += 1;
        }
    }
    assert_eq!(state.board().occupied().len(), TILE_COUNT);
    assert!(state
        .holding(AreaId::Left)
        .slots()
        .iter()
        .chain(state.holding(AreaId::Right).slots())
        .all(|s| s.is_blank()));
    assert!(state.slots_consistent());
}
