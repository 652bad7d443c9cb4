//! Help overlay: key bindings from the shortcut registry and the treatment legend.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{AppState, Theme};
use crate::models::TreatmentKind;
use crate::projection::AGGREGATE_PRIORITY;
use crate::shortcuts::{ShortcutRegistry, CONTEXT_MAIN};

/// Help overlay widget.
pub struct HelpOverlay;

impl HelpOverlay {
    /// Lines shown in the overlay.
    #[must_use]
    pub fn content(registry: &ShortcutRegistry, theme: &Theme) -> Vec<Line<'static>> {
        let heading = |text: &str| {
            Line::from(Span::styled(
                format!("═══ {text} ═══"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
        };

        let mut lines = vec![heading("KEYS"), Line::from("")];
        for (keys, description) in registry.help_entries(CONTEXT_MAIN) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<22}"), Style::default().fg(theme.success)),
                Span::styled(description, Style::default().fg(theme.text)),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<22}", "Mouse click"), Style::default().fg(theme.success)),
            Span::styled(
                "Apply tool to the clicked surface or palette entry",
                Style::default().fg(theme.text),
            ),
        ]));

        lines.push(Line::from(""));
        lines.push(heading("TREATMENTS"));
        lines.push(Line::from(""));
        for kind in TreatmentKind::ALL {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("  ", Style::default().bg(kind.color().to_ratatui_color())),
                Span::styled(
                    format!(" {:<12} {}", kind.display_name(), kind.color()),
                    Style::default().fg(theme.text),
                ),
            ]));
        }

        lines.push(Line::from(""));
        let priority: Vec<&str> = AGGREGATE_PRIORITY
            .iter()
            .map(|kind| kind.display_name())
            .collect();
        lines.push(Line::from(Span::styled(
            format!("  Whole-tooth view shows the first of: {}", priority.join(" > ")),
            Style::default().fg(theme.text_muted),
        )));
        lines.push(Line::from(Span::styled(
            "  Extraction always marks all five surfaces.",
            Style::default().fg(theme.text_muted),
        )));
        lines
    }

    /// Render the overlay centered in `area`.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let modal_area = super::centered_rect(70, 80, area);

        f.render_widget(Clear, modal_area);
        let paragraph = Paragraph::new(Self::content(&state.shortcuts, theme))
            .block(
                Block::default()
                    .title(" Help - Esc to close ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            )
            .style(Style::default().fg(theme.text).bg(theme.background))
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
