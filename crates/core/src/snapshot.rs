use crate::types::{Location, Segment, TileKey, BOARD_CELLS, HOLDING_AREA_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub key: TileKey,
    pub id: i32,
    pub rotation: u8,
    pub segments: Vec<Segment>,
    pub selected: bool,
    /// Drawn with the invalid-move border this frame
    pub bordered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SlotSnapshot {
    #[default]
    Blank,
    Tile(TileSnapshot),
}

impl SlotSnapshot {
    pub fn tile(&self) -> Option<&TileSnapshot> {
        match self {
            SlotSnapshot::Tile(t) => Some(t),
            SlotSnapshot::Blank => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, SlotSnapshot::Blank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [SlotSnapshot; BOARD_CELLS],
    pub holding: [Vec<SlotSnapshot>; HOLDING_AREA_COUNT],
    pub selected: Option<TileKey>,
    pub flashing: Option<TileKey>,
    pub game_id: u32,
    pub seed: u64,
    pub revision: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = Default::default();
        for area in &mut self.holding {
            area.clear();
        }
        self.selected = None;
        self.flashing = None;
        self.game_id = 0;
        self.seed = 0;
        self.revision = 0;
    }

    /// Every tile in the snapshot with its slot location
    pub fn tiles(&self) -> impl Iterator<Item = (Location, &TileSnapshot)> + '_ {
        let board = self
            .board
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.tile().map(|t| (Location::Board(i), t)));
        let holding = crate::types::AreaId::ALL.into_iter().flat_map(move |area| {
            self.holding[area.index()]
                .iter()
                .enumerate()
                .filter_map(move |(i, s)| s.tile().map(|t| (Location::Holding(area, i), t)))
        });
        board.chain(holding)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: Default::default(),
            holding: Default::default(),
            selected: None,
            flashing: None,
            game_id: 0,
            seed: 0,
            revision: 0,
        };
        s.clear();
        s
    }
}
