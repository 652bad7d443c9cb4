//! Chart widget: both arcades drawn from the active projection.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::chart_layout::{
    focus_slot, surface_at, ChartGeometry, CHART_INNER_HEIGHT, CHART_INNER_WIDTH, SLOT_WIDTH,
    TOOTH_HEIGHT, TOOTH_WIDTH,
};
use super::{AppState, Theme};
use crate::models::{Arcade, Surface, ToothId, ARCADE_LEN};
use crate::projection::{aggregate_view, flat_view, AggregateToothView, ChartView, FlatToothView};

const EMPTY_SLOT: &str = "  ";
const FOCUS_SLOT: &str = "▓▓";
const REMOVED_SLOT: &str = "╳╳";

/// Renders the two arcades.
pub struct ChartWidget;

impl ChartWidget {
    /// Render the chart panel.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let block = Self::block(state);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(geo) = ChartGeometry::fit(inner) else {
            let message = Paragraph::new(format!(
                "Terminal too small for the chart (needs {}x{})",
                CHART_INNER_WIDTH + 2,
                CHART_INNER_HEIGHT + 2
            ))
            .style(Style::default().fg(theme.text_muted));
            f.render_widget(message, inner);
            return;
        };

        let buf = f.buffer_mut();
        draw_midlines(buf, &geo, theme);

        for arcade in [Arcade::Upper, Arcade::Lower] {
            for (column, tooth) in state.layout.row(arcade).iter().copied().enumerate() {
                let focused = arcade == state.cursor.arcade && column == state.cursor.column;
                match state.view {
                    ChartView::Flat => {
                        let view = flat_view(&state.chart, tooth);
                        let focus = focused.then_some(state.cursor.surface);
                        draw_flat_tooth(buf, &geo, arcade, column, &view, focus, theme);
                    }
                    ChartView::Aggregate => {
                        let view = aggregate_view(&state.chart, tooth);
                        draw_aggregate_tooth(buf, &geo, arcade, column, &view, focused, theme);
                    }
                }
                draw_label(buf, &geo, arcade, column, tooth, focused, theme);
            }
        }
    }

    /// Bordered block around the chart.
    #[must_use]
    pub fn block(state: &AppState) -> Block<'static> {
        Block::default()
            .title(format!(" Chart: {} ", state.view.display_name()))
            .borders(Borders::ALL)
            .style(
                Style::default()
                    .fg(state.theme.primary)
                    .bg(state.theme.background),
            )
    }

    /// Geometry of the chart drawn in `area` (the whole panel, border included).
    ///
    /// `None` when the panel only shows the "too small" message.
    #[must_use]
    pub fn geometry(area: Rect) -> Option<ChartGeometry> {
        ChartGeometry::fit(Block::default().borders(Borders::ALL).inner(area))
    }
}

fn slot_position(
    geo: &ChartGeometry,
    arcade: Arcade,
    column: usize,
    row: usize,
    col: usize,
) -> (u16, u16) {
    (
        geo.tooth_x(column) + col as u16 * SLOT_WIDTH,
        geo.teeth_y(arcade) + row as u16,
    )
}

fn draw_flat_tooth(
    buf: &mut Buffer,
    geo: &ChartGeometry,
    arcade: Arcade,
    column: usize,
    view: &FlatToothView,
    focus: Option<Surface>,
    theme: &Theme,
) {
    let focused_slot = focus.map(|surface| focus_slot(arcade, column, surface));

    for row in 0..TOOTH_HEIGHT as usize {
        for col in 0..3 {
            let surface = surface_at(arcade, column, row, col);
            let fill = view.display_color(surface).to_ratatui_color();
            let (x, y) = slot_position(geo, arcade, column, row, col);

            let (symbol, fg) = if focused_slot == Some((row, col)) {
                (FOCUS_SLOT, theme.accent)
            } else if view.shows_removed_marker() && (row, col) == (1, 1) {
                (REMOVED_SLOT, theme.removed_marker)
            } else {
                (EMPTY_SLOT, theme.text)
            };
            buf.set_string(x, y, symbol, Style::default().fg(fg).bg(fill));
        }
    }
}

fn draw_aggregate_tooth(
    buf: &mut Buffer,
    geo: &ChartGeometry,
    arcade: Arcade,
    column: usize,
    view: &AggregateToothView,
    focused: bool,
    theme: &Theme,
) {
    let fill = view.color.to_ratatui_color();
    for row in 0..TOOTH_HEIGHT {
        let y = geo.teeth_y(arcade) + row;
        buf.set_string(
            geo.tooth_x(column),
            y,
            " ".repeat(usize::from(TOOTH_WIDTH)),
            Style::default().bg(fill),
        );
    }

    if focused {
        let (x, y) = slot_position(geo, arcade, column, 1, 1);
        buf.set_string(x, y, FOCUS_SLOT, Style::default().fg(theme.accent).bg(fill));
    }
}

fn draw_label(
    buf: &mut Buffer,
    geo: &ChartGeometry,
    arcade: Arcade,
    column: usize,
    tooth: ToothId,
    focused: bool,
    theme: &Theme,
) {
    let style = if focused {
        Style::default()
            .fg(theme.background)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_secondary).bg(theme.background)
    };
    let label = format!("{:^width$}", tooth.number(), width = usize::from(TOOTH_WIDTH));
    buf.set_string(geo.tooth_x(column), geo.label_y(arcade), label, style);
}

/// Vertical midline between the quadrants and the horizontal occlusal line.
fn draw_midlines(buf: &mut Buffer, geo: &ChartGeometry, theme: &Theme) {
    let style = Style::default().fg(theme.text_muted).bg(theme.background);
    let midline_x = geo.tooth_x(ARCADE_LEN / 2 - 1) + TOOTH_WIDTH + 1;
    let occlusal_y = geo.label_y(Arcade::Upper) + 1;
    let left = geo.tooth_x(0);
    let right = geo.tooth_x(ARCADE_LEN - 1) + TOOTH_WIDTH;

    for x in left..right {
        buf.set_string(x, occlusal_y, "─", style);
    }
    for y in geo.teeth_y(Arcade::Upper)..geo.teeth_y(Arcade::Lower) + TOOTH_HEIGHT {
        let symbol = if y == occlusal_y { "┼" } else { "│" };
        buf.set_string(midline_x, y, symbol, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ThemeMode};
    use crate::models::{ChartDocument, Tool, TreatmentKind, UNTREATED_COLOR};
    use ratatui::{backend::TestBackend, Terminal};

    fn state() -> AppState {
        let mut config = Config::new();
        config.ui.theme_mode = ThemeMode::Dark;
        AppState::new(ChartDocument::default(), None, config)
    }

    fn draw(state: &AppState) -> (Buffer, ChartGeometry) {
        let area = Rect::new(0, 0, CHART_INNER_WIDTH + 2, CHART_INNER_HEIGHT + 2);
        let mut terminal = Terminal::new(TestBackend::new(area.width, area.height)).unwrap();
        terminal
            .draw(|f| ChartWidget::render(f, area, state))
            .unwrap();
        (terminal.backend().buffer().clone(), ChartWidget::geometry(area).unwrap())
    }

    #[test]
    fn test_flat_surface_is_filled_with_treatment_color() {
        let mut state = state();
        state.cursor.column = 5;
        state.controller.set_tool(Tool::Apply(TreatmentKind::Restoration));
        state.chart.set_surface(
            ToothId(16),
            Surface::Vestibular,
            Some(TreatmentKind::Restoration),
        );

        let (buf, geo) = draw(&state);
        // Tooth 16 is column 2 of the upper arcade; vestibular is the top row
        let cell = &buf[(geo.tooth_x(2), geo.teeth_y(Arcade::Upper))];
        assert_eq!(cell.bg, TreatmentKind::Restoration.color().to_ratatui_color());

        let untouched = &buf[(geo.tooth_x(2), geo.teeth_y(Arcade::Upper) + 2)];
        assert_eq!(untouched.bg, UNTREATED_COLOR.to_ratatui_color());
    }

    #[test]
    fn test_extracted_tooth_shows_marker() {
        let mut state = state();
        state.cursor.column = 5;
        state.chart.set_surface(ToothId(17), Surface::Occlusal, Some(TreatmentKind::Extraction));

        let (buf, geo) = draw(&state);
        let (x, y) = slot_position(&geo, Arcade::Upper, 1, 1, 1);
        assert_eq!(buf[(x, y)].symbol(), "╳");
    }

    #[test]
    fn test_aggregate_fills_whole_tooth_with_dominant_color() {
        let mut state = state();
        state.view = ChartView::Aggregate;
        state.cursor.column = 5;
        state.chart.set_surface(ToothId(47), Surface::Mesial, Some(TreatmentKind::Canal));
        state.chart.set_surface(ToothId(47), Surface::Distal, Some(TreatmentKind::Caries));

        let (buf, geo) = draw(&state);
        let expected = TreatmentKind::Caries.color().to_ratatui_color();
        for row in 0..TOOTH_HEIGHT {
            let cell = &buf[(geo.tooth_x(1) + 5, geo.teeth_y(Arcade::Lower) + row)];
            assert_eq!(cell.bg, expected);
        }
    }

    #[test]
    fn test_focused_surface_is_marked() {
        let mut state = state();
        state.cursor.surface = Surface::Lingual;

        let (buf, geo) = draw(&state);
        let (row, col) = focus_slot(Arcade::Upper, 0, Surface::Lingual);
        let (x, y) = slot_position(&geo, Arcade::Upper, 0, row, col);
        assert_eq!(buf[(x, y)].symbol(), "▓");
        assert_eq!(buf[(x, y)].fg, state.theme.accent);
    }

    #[test]
    fn test_small_area_shows_message() {
        let state = state();
        let area = Rect::new(0, 0, 40, 8);
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal
            .draw(|f| ChartWidget::render(f, area, &state))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(text.contains("Terminal too small"));
        assert_eq!(ChartWidget::geometry(area), None);
    }
}
