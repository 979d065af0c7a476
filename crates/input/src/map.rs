//! Key mapping from terminal events to menu intents.

use crate::types::MenuIntent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard shortcuts to the menu buttons.
pub fn handle_key_event(key: KeyEvent) -> Option<MenuIntent> {
    match key.code {
        KeyCode::Char('n') | KeyCode::Char('N') => Some(MenuIntent::NewGame),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(MenuIntent::ResetGame),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(MenuIntent::Quit),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
