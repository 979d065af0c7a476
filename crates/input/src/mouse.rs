//! Mouse mapping from terminal events to pointer presses.

use crate::types::MouseButton;
use crossterm::event::{MouseButton as TermButton, MouseEvent, MouseEventKind};

/// A button press at a terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub column: u16,
    pub row: u16,
    pub button: MouseButton,
}

/// Map a press of the left or right button; everything else is dropped.
///
/// Only the press is reported so a click acts once, like a GUI button.
pub fn handle_mouse_event(event: MouseEvent) -> Option<Pointer> {
    let button = match event.kind {
        MouseEventKind::Down(TermButton::Left) => MouseButton::Primary,
        MouseEventKind::Down(TermButton::Right) => MouseButton::Secondary,
        _ => return None,
    };
    Some(Pointer {
        column: event.column,
        row: event.row,
        button,
    })
}
