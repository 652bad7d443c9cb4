//! Tool palette: the five treatments in vocabulary order plus the eraser.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::AppState;
use crate::models::{treatment_color, Tool, TreatmentKind};

/// One palette entry with its shortcut key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Tool selected by the entry
    pub tool: Tool,
    /// Shortcut key shown before the name
    pub key: char,
}

impl PaletteEntry {
    /// Cells taken by the entry: " k ██ Name ".
    #[must_use]
    pub fn width(&self) -> u16 {
        (self.tool.display_name().chars().count() + 7) as u16
    }
}

/// Palette entries in display order.
#[must_use]
pub fn entries() -> Vec<PaletteEntry> {
    let mut entries: Vec<PaletteEntry> = TreatmentKind::ALL
        .into_iter()
        .zip('1'..='5')
        .map(|(kind, key)| PaletteEntry {
            tool: Tool::Apply(kind),
            key,
        })
        .collect();
    entries.push(PaletteEntry {
        tool: Tool::Erase,
        key: '0',
    });
    entries
}

/// Renders the palette and maps clicks back to tools.
pub struct PaletteWidget;

impl PaletteWidget {
    /// Render the palette.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let selected = state.controller.selected_tool();

        let mut spans = Vec::new();
        for (i, entry) in entries().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let is_selected = entry.tool == selected;
            let text_style = if is_selected {
                Style::default()
                    .fg(theme.accent)
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };

            spans.push(Span::styled(format!(" {} ", entry.key), text_style));
            spans.push(Span::styled(
                "  ",
                Style::default().bg(treatment_color(entry.tool.treatment()).to_ratatui_color()),
            ));
            spans.push(Span::styled(
                format!(" {} ", entry.tool.display_name()),
                text_style,
            ));
        }

        let palette = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(" Tool ")
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.primary).bg(theme.background)),
        );
        f.render_widget(palette, area);
    }

    /// Tool whose entry covers the cell `(x, y)` of a palette drawn in `area`.
    #[must_use]
    pub fn hit_test(area: Rect, x: u16, y: u16) -> Option<Tool> {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        if y != inner.y || x < inner.x {
            return None;
        }

        let mut left = inner.x;
        for entry in entries() {
            let right = left + entry.width();
            if x >= left && x < right {
                return Some(entry.tool);
            }
            left = right + 1;
        }
        None
    }
}
