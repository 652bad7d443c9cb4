//! Action dispatch for the chart editor.

use anyhow::Result;
use tracing::{error, info};

use crate::models::ARCADE_LEN;
use crate::shortcuts::Action;
use crate::tui::{AppState, PopupType};

/// Dispatch action to appropriate handler. Returns `true` to quit.
pub fn dispatch_action(state: &mut AppState, action: Action) -> Result<bool> {
    match action {
        // Navigation
        Action::NavigateUp | Action::NavigateDown => {
            state.focus(state.cursor.arcade.opposite(), state.cursor.column);
            Ok(false)
        }
        Action::NavigateLeft => {
            state.focus(state.cursor.arcade, state.cursor.column.saturating_sub(1));
            Ok(false)
        }
        Action::NavigateRight => {
            state.focus(state.cursor.arcade, state.cursor.column + 1);
            Ok(false)
        }
        Action::JumpToFirst => {
            state.focus(state.cursor.arcade, 0);
            Ok(false)
        }
        Action::JumpToLast => {
            state.focus(state.cursor.arcade, ARCADE_LEN - 1);
            Ok(false)
        }
        Action::NextSurface => {
            state.cursor.surface = state.cursor.surface.next();
            Ok(false)
        }
        Action::PreviousSurface => {
            state.cursor.surface = state.cursor.surface.previous();
            Ok(false)
        }

        // Charting
        Action::SelectTool(tool) => {
            state.controller.set_tool(tool);
            state.set_status(format!("Tool: {}", tool.display_name()));
            Ok(false)
        }
        Action::Apply => {
            state.apply_at_cursor();
            Ok(false)
        }
        Action::ClearTooth => handle_clear_tooth(state),
        Action::ToggleView => {
            state.view = state.view.toggled();
            state.set_status(format!("{} view", state.view.display_name()));
            Ok(false)
        }

        // File operations
        Action::Save => {
            handle_save(state);
            Ok(false)
        }
        Action::Quit => {
            if state.dirty {
                state.active_popup = Some(PopupType::UnsavedChangesPrompt);
                Ok(false)
            } else {
                Ok(true)
            }
        }
        Action::SaveAndQuit => {
            state.active_popup = None;
            Ok(handle_save(state))
        }
        Action::DiscardAndQuit => {
            info!("Quitting without saving");
            Ok(true)
        }

        // Help
        Action::ToggleHelp => {
            state.active_popup = match state.active_popup {
                Some(PopupType::HelpOverlay) => None,
                _ => Some(PopupType::HelpOverlay),
            };
            Ok(false)
        }

        Action::Cancel => {
            state.active_popup = None;
            state.set_status("");
            Ok(false)
        }
    }
}

fn handle_clear_tooth(state: &mut AppState) -> Result<bool> {
    let tooth = state.focused_tooth();
    if state.chart.get_tooth(tooth).is_empty() {
        state.set_status(format!("Tooth {tooth}: nothing to clear"));
    } else {
        state.chart.clear_tooth(tooth);
        state.mark_dirty();
        state.set_status(format!("Tooth {tooth}: cleared"));
    }
    Ok(false)
}

/// Saves and reports the outcome; `true` on success.
fn handle_save(state: &mut AppState) -> bool {
    match state.save() {
        Ok(path) => {
            state.set_status(format!("Saved to {}", path.display()));
            true
        }
        Err(e) => {
            error!("Save failed: {:#}", e);
            state.set_error(format!("Save failed: {e:#}"));
            false
        }
    }
}
