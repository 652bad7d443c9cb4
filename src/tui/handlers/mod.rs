//! Input handler modules for different TUI contexts.

pub mod actions;
pub mod main;
pub mod mouse;
pub mod popups;

// Re-export handler functions
pub use actions::dispatch_action;
pub use main::handle_main_input;
pub use mouse::handle_mouse_event;
pub use popups::handle_popup_input;

#[cfg(test)]
mod tests {
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::layout::Rect;

    use crate::config::{Config, ThemeMode};
    use crate::models::{Arcade, ChartDocument, Surface, Tool, ToothId, TreatmentKind};
    use crate::projection::ChartView;
    use crate::tui::{handle_key_event, screen_layout, AppState, ChartWidget, PopupType};

    fn state() -> AppState {
        let mut config = Config::new();
        config.ui.theme_mode = ThemeMode::Dark;
        config.ui.show_help_on_startup = false;
        let mut state = AppState::new(ChartDocument::default(), None, config);
        let areas = screen_layout(Rect::new(0, 0, 130, 30));
        state.chart_area = areas[1];
        state.palette_area = areas[2];
        state
    }

    fn press(state: &mut AppState, code: KeyCode) -> bool {
        handle_key_event(state, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn click(state: &mut AppState, column: u16, row: u16) {
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        super::handle_mouse_event(state, event).unwrap();
    }

    #[test]
    fn test_navigation_clamps_at_row_ends() {
        let mut state = state();
        press(&mut state, KeyCode::Left);
        assert_eq!(state.cursor.column, 0);

        press(&mut state, KeyCode::End);
        press(&mut state, KeyCode::Right);
        assert_eq!(state.cursor.column, 15);
        assert_eq!(state.focused_tooth(), ToothId(28));

        press(&mut state, KeyCode::Down);
        assert_eq!(state.cursor.arcade, Arcade::Lower);
        assert_eq!(state.focused_tooth(), ToothId(38));
    }

    #[test]
    fn test_keyboard_charting_flow() {
        let mut state = state();
        // Tooth 17, mesial surface, restoration
        press(&mut state, KeyCode::Right);
        while state.cursor.surface != Surface::Mesial {
            press(&mut state, KeyCode::Tab);
        }
        press(&mut state, KeyCode::Char('2'));
        press(&mut state, KeyCode::Enter);

        let map = state.chart.get_tooth(ToothId(17));
        assert_eq!(map.get(Surface::Mesial), Some(TreatmentKind::Restoration));
        assert_eq!(map.treated().count(), 1);
        assert!(state.dirty);

        // Extraction covers the whole tooth, the eraser then clears it
        press(&mut state, KeyCode::Char('4'));
        press(&mut state, KeyCode::Char(' '));
        assert_eq!(state.chart.get_tooth(ToothId(17)).treated().count(), 5);

        press(&mut state, KeyCode::Char('0'));
        press(&mut state, KeyCode::Enter);
        assert!(state.chart.get_tooth(ToothId(17)).is_empty());
    }

    #[test]
    fn test_clear_tooth() {
        let mut state = state();
        state.controller.set_tool(Tool::Apply(TreatmentKind::Implant));
        state.apply_at_cursor();
        state.mark_clean();

        press(&mut state, KeyCode::Char('x'));
        assert!(state.chart.is_empty());
        assert!(state.dirty);
    }

    #[test]
    fn test_toggle_view() {
        let mut state = state();
        press(&mut state, KeyCode::Char('v'));
        assert_eq!(state.view, ChartView::Aggregate);
        press(&mut state, KeyCode::Char('v'));
        assert_eq!(state.view, ChartView::Flat);
    }

    #[test]
    fn test_quit_clean_exits_immediately() {
        let mut state = state();
        assert!(press(&mut state, KeyCode::Char('q')));
    }

    #[test]
    fn test_quit_dirty_prompts() {
        let mut state = state();
        state.apply_at_cursor();

        assert!(!press(&mut state, KeyCode::Char('q')));
        assert_eq!(state.active_popup, Some(PopupType::UnsavedChangesPrompt));

        // Chart keys are inert while the prompt is open
        assert!(!press(&mut state, KeyCode::Right));
        assert_eq!(state.cursor.column, 0);

        press(&mut state, KeyCode::Esc);
        assert_eq!(state.active_popup, None);

        press(&mut state, KeyCode::Char('q'));
        assert!(press(&mut state, KeyCode::Char('q')));
    }

    #[test]
    fn test_save_and_quit_from_prompt() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("chart.json");
        let mut state = state();
        state.source_path = Some(path.clone());
        state.apply_at_cursor();

        press(&mut state, KeyCode::Char('q'));
        assert!(press(&mut state, KeyCode::Char('s')));
        assert!(path.exists());
        assert!(!state.dirty);
    }

    #[test]
    fn test_help_overlay_toggles() {
        let mut state = state();
        press(&mut state, KeyCode::Char('?'));
        assert_eq!(state.active_popup, Some(PopupType::HelpOverlay));
        press(&mut state, KeyCode::Enter);
        assert!(state.chart.is_empty());
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.active_popup, None);
    }

    #[test]
    fn test_error_overlay_blocks_input() {
        let mut state = state();
        state.set_error("boom");
        press(&mut state, KeyCode::Enter);
        assert!(state.chart.is_empty());
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn test_mouse_click_applies_to_surface() {
        let mut state = state();
        let geo = ChartWidget::geometry(state.chart_area).unwrap();
        // Center slot of lower column 3 (tooth 45)
        click(&mut state, geo.tooth_x(3) + 2, geo.teeth_y(Arcade::Lower) + 1);

        assert_eq!(state.focused_tooth(), ToothId(45));
        assert_eq!(
            state.chart.get_tooth(ToothId(45)).get(Surface::Occlusal),
            Some(TreatmentKind::Caries)
        );
    }

    #[test]
    fn test_mouse_click_on_label_only_focuses() {
        let mut state = state();
        let geo = ChartWidget::geometry(state.chart_area).unwrap();
        click(&mut state, geo.tooth_x(10), geo.label_y(Arcade::Upper));

        assert_eq!(state.focused_tooth(), ToothId(23));
        assert!(state.chart.is_empty());
    }

    #[test]
    fn test_mouse_click_on_undrawn_chart_is_ignored() {
        let mut state = state();
        let areas = screen_layout(Rect::new(0, 0, 80, 24));
        state.chart_area = areas[1];
        state.palette_area = areas[2];

        let (x, y) = (state.chart_area.x + 3, state.chart_area.y + 2);
        click(&mut state, x, y);

        assert!(state.chart.is_empty());
        assert!(!state.dirty);
        assert_eq!(state.focused_tooth(), ToothId(18));
    }

    #[test]
    fn test_mouse_click_in_aggregate_view_writes_occlusal() {
        let mut state = state();
        state.view = ChartView::Aggregate;
        let geo = ChartWidget::geometry(state.chart_area).unwrap();
        click(&mut state, geo.tooth_x(0), geo.teeth_y(Arcade::Upper));

        let map = state.chart.get_tooth(ToothId(18));
        assert_eq!(map.get(Surface::Occlusal), Some(TreatmentKind::Caries));
        assert_eq!(map.treated().count(), 1);
    }

    #[test]
    fn test_mouse_click_on_palette_selects_tool() {
        let mut state = state();
        let inner_x = state.palette_area.x + 1;
        let inner_y = state.palette_area.y + 1;
        click(&mut state, inner_x, inner_y);
        assert_eq!(
            state.controller.selected_tool(),
            Tool::Apply(TreatmentKind::Caries)
        );

        state.controller.set_tool(Tool::Erase);
        click(&mut state, inner_x, inner_y);
        assert_eq!(
            state.controller.selected_tool(),
            Tool::Apply(TreatmentKind::Caries)
        );
    }
}
