//! Flash module - the invalid-move border flash
//!
//! A flash is a small timer tagged with the tile it decorates. It fires once
//! immediately and then every [`FLASH_INTERVAL_MS`]; the border is shown on
//! even-numbered fires and the flash stops itself on fire [`FLASH_TICKS`].

use crate::types::{TileKey, FLASH_INTERVAL_MS, FLASH_TICKS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    target: TileKey,
    fired: u8,
    elapsed_ms: u32,
    bordered: bool,
}

impl Flash {
    /// Start a flash on `target`; the first fire happens immediately
    pub fn start(target: TileKey) -> Self {
        let mut flash = Self {
            target,
            fired: 0,
            elapsed_ms: 0,
            bordered: false,
        };
        flash.fire();
        flash
    }

    pub fn target(&self) -> TileKey {
        self.target
    }

    /// Whether the target is currently drawn with the warning border
    pub fn bordered(&self) -> bool {
        self.bordered
    }

    pub fn finished(&self) -> bool {
        self.fired >= FLASH_TICKS
    }

    /// Advance the timer, returning true when the border state changed
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if self.finished() {
            return false;
        }
        let before = self.bordered;
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        while self.elapsed_ms >= FLASH_INTERVAL_MS && !self.finished() {
            self.elapsed_ms -= FLASH_INTERVAL_MS;
            self.fire();
        }
        before != self.bordered || self.finished()
    }

    fn fire(&mut self) {
        self.fired += 1;
        self.bordered = self.fired < FLASH_TICKS && self.fired % 2 == 0;
    }
}
