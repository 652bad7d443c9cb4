//! Status bar widget for the focused tooth, messages and key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};
use crate::projection::{aggregate_view, ChartView};

/// Hints on the bottom line, most used first.
const HINTS: [(&str, &str); 7] = [
    ("←→↑↓", "tooth"),
    ("Tab", "surface"),
    ("1-5/0", "tool"),
    ("Enter", "apply"),
    ("v", "view"),
    ("Ctrl+S", "save"),
    ("?", "help"),
];

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let first_line = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.clone()),
            ])
        } else if !state.status_message.is_empty() {
            Line::from(Span::styled(
                state.status_message.clone(),
                Style::default().fg(theme.text),
            ))
        } else {
            Self::focus_line(state, theme)
        };

        let status = Paragraph::new(vec![first_line, Self::hints_line(theme)]).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .style(Style::default().bg(theme.background)),
        );

        f.render_widget(status, area);
    }

    /// Description of the focused tooth, e.g. "Tooth 16  Mesial: Caries".
    #[must_use]
    pub fn focus_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let tooth = state.focused_tooth();
        let map = state.chart.get_tooth(tooth);

        let detail = match state.view {
            ChartView::Flat => {
                let surface = state.cursor.surface;
                let treatment = map
                    .get(surface)
                    .map_or("untreated", |kind| kind.display_name());
                format!("{surface}: {treatment}")
            }
            ChartView::Aggregate => aggregate_view(&state.chart, tooth)
                .dominant
                .map_or_else(|| "untreated".to_string(), |kind| kind.display_name().to_string()),
        };

        Line::from(vec![
            Span::styled(
                format!("Tooth {tooth}  "),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(detail, Style::default().fg(theme.text)),
        ])
    }

    fn hints_line(theme: &Theme) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (key, action)) in HINTS.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(key, Style::default().fg(theme.accent)));
            spans.push(Span::raw(": "));
            spans.push(Span::styled(action, Style::default().fg(theme.text_muted)));
        }
        Line::from(spans)
    }
}
