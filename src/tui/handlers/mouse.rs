//! Mouse clicks on the chart and the palette.

use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::projection::ChartView;
use crate::tui::{AppState, ChartWidget, PaletteWidget};

/// Handle a mouse event. Clicks never quit.
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent) -> Result<bool> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left)
        || state.error_message.is_some()
        || state.active_popup.is_some()
    {
        return Ok(false);
    }

    if let Some(tool) = PaletteWidget::hit_test(state.palette_area, mouse.column, mouse.row) {
        state.controller.set_tool(tool);
        state.set_status(format!("Tool: {}", tool.display_name()));
        return Ok(false);
    }

    let Some(hit) = ChartWidget::geometry(state.chart_area)
        .and_then(|geometry| geometry.hit_test(mouse.column, mouse.row))
    else {
        return Ok(false);
    };

    state.focus(hit.arcade, hit.column);
    match (state.view, hit.surface) {
        (ChartView::Flat, Some(surface)) => {
            state.cursor.surface = surface;
            state.apply_at_cursor();
        }
        // Clicking a tooth number in the flat view only focuses the tooth
        (ChartView::Flat, None) => {}
        (ChartView::Aggregate, _) => {
            state.apply_at_cursor();
        }
    }
    Ok(false)
}
