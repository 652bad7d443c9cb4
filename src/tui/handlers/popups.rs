//! Input handling while a popup is open.

use anyhow::Result;
use crossterm::event;

use crate::shortcuts::{Action, CONTEXT_MAIN, CONTEXT_UNSAVED};
use crate::tui::{AppState, PopupType};

/// Handle input for the active popup
pub fn handle_popup_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match state.active_popup {
        Some(PopupType::HelpOverlay) => {
            // Only the keys that close the overlay do anything
            match state.shortcuts.lookup(CONTEXT_MAIN, key) {
                Some(Action::ToggleHelp | Action::Cancel) => state.active_popup = None,
                _ => {}
            }
            Ok(false)
        }
        Some(PopupType::UnsavedChangesPrompt) => {
            match state.shortcuts.lookup(CONTEXT_UNSAVED, key) {
                Some(action) => super::dispatch_action(state, action),
                None => Ok(false),
            }
        }
        None => Ok(false),
    }
}
