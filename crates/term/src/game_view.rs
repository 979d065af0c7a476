//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It owns the screen layout, so it also answers
//! the reverse question: which slot or menu button sits under a terminal cell.

use crate::core::{GameSnapshot, SlotSnapshot, TileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    AreaId, BoardPoint, ClickTarget, MenuIntent, Segment, BOARD_SIDE, TILE_EXTENT,
};

/// Tiles per row inside a holding area.
const HOLDING_COLUMNS: u16 = 2;
/// Columns between the holding areas and the board.
const GAP: u16 = 2;
/// Largest tile side, in cells, a view will draw.
pub const MAX_TILE_SIDE: u16 = 32;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const FRAME_FG: Rgb = Rgb::new(200, 200, 200);
const BLANK_FG: Rgb = Rgb::new(90, 90, 100);
const TILE_BG: Rgb = Rgb::new(225, 220, 205);
const TILE_FG: Rgb = Rgb::new(40, 40, 40);
const SELECTED_BG: Rgb = Rgb::new(70, 70, 80);
const SELECTED_FG: Rgb = Rgb::new(240, 240, 240);
const FLASH_FG: Rgb = Rgb::new(230, 40, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// What a pointer press landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Click(ClickTarget),
    Menu(MenuIntent),
}

/// A terminal-cell rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && row >= self.y && col - self.x < self.w && row - self.y < self.h
    }

    /// The rectangle inside a one-cell frame
    pub fn inner(&self) -> Rect {
        Rect {
            x: self.x + 1,
            y: self.y + 1,
            w: self.w.saturating_sub(2),
            h: self.h.saturating_sub(2),
        }
    }
}

/// Where everything sits for one viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub menu: [(Rect, MenuIntent); 3],
    /// Holding area frames, indexed by `AreaId::index`
    pub areas: [Rect; 2],
    /// Board frame
    pub board: Rect,
    pub status_y: u16,
}

/// A lightweight terminal renderer for the maze puzzle.
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2:1 columns per row compensates for typical glyph aspect ratio.
        Self::new(8, 4)
    }
}

impl GameView {
    /// Tile sides are clamped to `1..=MAX_TILE_SIDE` cells.
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.clamp(1, MAX_TILE_SIDE),
            tile_h: tile_h.clamp(1, MAX_TILE_SIDE),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn tile_size(&self) -> (u16, u16) {
        (self.tile_w, self.tile_h)
    }

    /// Compute the layout for `snap` in `viewport`.
    ///
    /// Holding areas grow downward when they hold more tiles than fit beside
    /// the board.
    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let side = BOARD_SIDE as u16;
        let longest = snap.holding.iter().map(Vec::len).max().unwrap_or(0) as u16;
        let rows = longest.div_ceil(HOLDING_COLUMNS).max(side);

        let area_w = HOLDING_COLUMNS * self.tile_w + 2;
        let area_h = rows * self.tile_h + 2;
        let board_w = side * self.tile_w + 2;
        let board_h = side * self.tile_h + 2;

        let total_w = area_w * 2 + board_w + GAP * 2;
        let content_h = area_h.max(board_h);
        // Menu row, spacer, content, status row.
        let total_h = content_h + 3;

        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };
        let content_y = start_y + 2;

        let mut menu = [(Rect::default(), MenuIntent::NewGame); 3];
        let mut x = start_x;
        for (slot, intent) in menu.iter_mut().zip(MenuIntent::ALL) {
            let w = intent.label().chars().count() as u16 + 4;
            *slot = (
                Rect {
                    x,
                    y: start_y,
                    w,
                    h: 1,
                },
                intent,
            );
            x += w + GAP;
        }

        let left = Rect {
            x: start_x,
            y: content_y,
            w: area_w,
            h: area_h,
        };
        let board = Rect {
            x: left.x + area_w + GAP,
            y: content_y,
            w: board_w,
            h: board_h,
        };
        let right = Rect {
            x: board.x + board_w + GAP,
            ..left
        };

        Layout {
            menu,
            areas: [left, right],
            board,
            status_y: content_y + content_h,
        }
    }

    /// Resolve a terminal cell into a menu button or a click target.
    ///
    /// Board hits are reported in board pixels so the controller sees the same
    /// coordinates whatever the tile size.
    pub fn hit_test(&self, snap: &GameSnapshot, viewport: Viewport, col: u16, row: u16) -> Option<Hit> {
        let layout = self.layout(snap, viewport);

        if let Some((_, intent)) = layout.menu.iter().find(|(r, _)| r.contains(col, row)) {
            return Some(Hit::Menu(*intent));
        }

        let board = layout.board.inner();
        if board.contains(col, row) {
            let extent = TILE_EXTENT as u32;
            let px = u32::from(col - board.x) * extent / u32::from(self.tile_w);
            let py = u32::from(row - board.y) * extent / u32::from(self.tile_h);
            let point = BoardPoint::new(px as u16, py as u16)?;
            return Some(Hit::Click(ClickTarget::Board(point)));
        }

        for area in AreaId::ALL {
            let inner = layout.areas[area.index()].inner();
            if inner.contains(col, row) {
                let c = (col - inner.x) / self.tile_w;
                let r = (row - inner.y) / self.tile_h;
                let index = (r * HOLDING_COLUMNS + c) as usize;
                return Some(Hit::Click(ClickTarget::Holding { area, index }));
            }
        }

        None
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap, viewport);

        let button = CellStyle {
            bold: true,
            ..CellStyle::new(Rgb::new(240, 240, 240), Rgb::new(50, 60, 80))
        };
        for (rect, intent) in &layout.menu {
            fb.fill_rect(rect.x, rect.y, rect.w, 1, ' ', button);
            fb.put_str(rect.x + 2, rect.y, intent.label(), button);
        }

        let board = layout.board.inner();
        fb.fill_rect(board.x, board.y, board.w, board.h, ' ', CellStyle::new(BLANK_FG, BOARD_BG));
        fb.draw_box(layout.board.x, layout.board.y, layout.board.w, layout.board.h, FRAME_FG);
        let side = BOARD_SIDE as u16;
        for (i, slot) in snap.board.iter().enumerate() {
            let (cx, cy) = (i as u16 % side, i as u16 / side);
            self.draw_slot(fb, board.x + cx * self.tile_w, board.y + cy * self.tile_h, slot);
        }

        for area in AreaId::ALL {
            let frame = layout.areas[area.index()];
            let inner = frame.inner();
            fb.draw_box(frame.x, frame.y, frame.w, frame.h, FRAME_FG);
            fb.put_str(frame.x + 2, frame.y, area.as_str(), CellStyle::new(FRAME_FG, Rgb::default()));
            for (i, slot) in snap.holding[area.index()].iter().enumerate() {
                let i = i as u16;
                let x = inner.x + (i % HOLDING_COLUMNS) * self.tile_w;
                let y = inner.y + (i / HOLDING_COLUMNS) * self.tile_h;
                self.draw_slot(fb, x, y, slot);
            }
        }

        self.draw_status(fb, snap, layout.areas[0].x, layout.status_y);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_slot(&self, fb: &mut FrameBuffer, x: u16, y: u16, slot: &SlotSnapshot) {
        match slot {
            SlotSnapshot::Blank => {
                fb.fill_rect(x, y, self.tile_w, self.tile_h, ' ', CellStyle::new(BLANK_FG, BOARD_BG));
                fb.draw_box(x, y, self.tile_w, self.tile_h, BLANK_FG);
            }
            SlotSnapshot::Tile(tile) => self.draw_tile(fb, x, y, tile),
        }
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, x: u16, y: u16, tile: &TileSnapshot) {
        let style = if tile.selected {
            CellStyle {
                bold: true,
                ..CellStyle::new(SELECTED_FG, SELECTED_BG)
            }
        } else {
            CellStyle::new(TILE_FG, TILE_BG)
        };
        fb.fill_rect(x, y, self.tile_w, self.tile_h, ' ', style);

        for seg in &tile.segments {
            let ch = segment_glyph(seg);
            let from = (to_cell(seg.x1, self.tile_w), to_cell(seg.y1, self.tile_h));
            let to = (to_cell(seg.x2, self.tile_w), to_cell(seg.y2, self.tile_h));
            for_each_line_cell(from, to, |cx, cy| {
                fb.put_char(x + cx as u16, y + cy as u16, ch, style);
            });
        }

        if tile.bordered {
            fb.draw_box(x, y, self.tile_w, self.tile_h, FLASH_FG);
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let dim = CellStyle {
            dim: true,
            ..CellStyle::default()
        };
        let mut cx = x;
        fb.put_str(cx, y, "game ", dim);
        cx += 5;
        cx += fb.put_uint(cx, y, u64::from(snap.game_id), dim);
        fb.put_str(cx, y, "  seed ", dim);
        cx += 7;
        fb.put_uint(cx, y, snap.seed, dim);
    }
}

/// Map a tile-local coordinate onto a cell offset within `span` cells.
fn to_cell(v: i32, span: u16) -> i32 {
    let span = i32::from(span);
    (v.clamp(0, TILE_EXTENT) * span / TILE_EXTENT).min(span - 1)
}

/// Pick a glyph by direction; terminal rows grow downward like tile y.
fn segment_glyph(seg: &Segment) -> char {
    use std::cmp::Ordering::Equal;

    let dx = seg.x2.cmp(&seg.x1);
    let dy = seg.y2.cmp(&seg.y1);
    match (dx, dy) {
        (Equal, Equal) => '·',
        (Equal, _) => '│',
        (_, Equal) => '─',
        _ if dx == dy => '╲',
        _ => '╱',
    }
}

/// Bresenham walk over the cells between two endpoints, inclusive.
fn for_each_line_cell(from: (i32, i32), to: (i32, i32), mut f: impl FnMut(i32, i32)) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        f(x, y);
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
