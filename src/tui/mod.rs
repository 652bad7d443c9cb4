//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and the chart widgets using Ratatui.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]

pub mod chart_layout;
pub mod chart_widget;
pub mod handlers;
pub mod help_overlay;
pub mod palette;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::charting::{ChartChange, ChartingController};
use crate::config::Config;
use crate::models::{
    Arcade, ArcadeLayout, Chart, ChartDocument, ChartMetadata, Surface, ToothId, ARCADE_LEN,
};
use crate::projection::ChartView;
use crate::services::ChartService;
use crate::shortcuts::ShortcutRegistry;

pub use chart_widget::ChartWidget;
pub use help_overlay::HelpOverlay;
pub use palette::PaletteWidget;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Height of the chart panel (arcades plus border).
const CHART_PANEL_HEIGHT: u16 = chart_layout::CHART_INNER_HEIGHT + 2;

/// Popup types that can be displayed over the main UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Key bindings and treatment legend
    HelpOverlay,
    /// Quit requested with unsaved changes
    UnsavedChangesPrompt,
}

/// Focused tooth and surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Arcade row
    pub arcade: Arcade,
    /// Display column within the arcade
    pub column: usize,
    /// Surface targeted by keyboard clicks in the flat view
    pub surface: Surface,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            arcade: Arcade::Upper,
            column: 0,
            surface: Surface::Occlusal,
        }
    }
}

/// Application state for the chart editor.
pub struct AppState {
    // Chart data
    /// The chart being edited
    pub chart: Chart,
    /// Metadata saved with the chart
    pub metadata: ChartMetadata,
    /// File the chart is saved to, if known
    pub source_path: Option<PathBuf>,
    /// Whether the chart changed since the last save
    pub dirty: bool,

    // Charting
    /// Selected tool and click translation
    pub controller: ChartingController,
    /// Active projection
    pub view: ChartView,
    /// Display order of the teeth
    pub layout: ArcadeLayout,
    /// Focused tooth and surface
    pub cursor: Cursor,

    // UI state
    /// Active color theme
    pub theme: Theme,
    /// Status line message
    pub status_message: String,
    /// Error shown in the error overlay
    pub error_message: Option<String>,
    /// Popup drawn over the chart
    pub active_popup: Option<PopupType>,
    /// Key bindings
    pub shortcuts: ShortcutRegistry,
    /// Chart panel from the last frame, for mouse hit-testing
    pub chart_area: Rect,
    /// Palette panel from the last frame, for mouse hit-testing
    pub palette_area: Rect,

    // System
    /// Application configuration
    pub config: Config,
    /// Set when the main loop should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates the editor state for a loaded or new document.
    #[must_use]
    pub fn new(document: ChartDocument, source_path: Option<PathBuf>, config: Config) -> Self {
        let chart = document.to_chart();
        let status_message = if config.ui.show_help_on_startup {
            "Press ? for help".to_string()
        } else {
            String::new()
        };

        Self {
            chart,
            metadata: document.metadata,
            source_path,
            dirty: false,
            controller: ChartingController::new(config.ui.default_tool),
            view: config.ui.default_view,
            layout: ArcadeLayout::default(),
            cursor: Cursor::default(),
            theme: Theme::from_mode(config.ui.theme_mode),
            status_message,
            error_message: None,
            active_popup: None,
            shortcuts: ShortcutRegistry::new(),
            chart_area: Rect::default(),
            palette_area: Rect::default(),
            config,
            should_quit: false,
        }
    }

    /// Tooth under the cursor.
    #[must_use]
    pub fn focused_tooth(&self) -> ToothId {
        self.layout.tooth_at(self.cursor.arcade, self.cursor.column)
    }

    /// Moves the cursor to a display slot, keeping the focused surface.
    pub fn focus(&mut self, arcade: Arcade, column: usize) {
        self.cursor.arcade = arcade;
        self.cursor.column = column.min(ARCADE_LEN - 1);
    }

    /// Moves the cursor to tooth `id`. Returns false when the tooth is not
    /// part of the displayed layout.
    pub fn focus_tooth(&mut self, id: ToothId) -> bool {
        match self.layout.locate(id) {
            Some((arcade, column)) => {
                self.focus(arcade, column);
                true
            }
            None => false,
        }
    }

    /// Marks the chart as modified.
    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Marks the chart as saved.
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Sets the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Shows an error overlay.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Dismisses the error overlay.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Clicks the focused tooth with the selected tool.
    ///
    /// The flat view targets the focused surface; the aggregate view
    /// targets the whole tooth.
    pub fn apply_at_cursor(&mut self) -> ChartChange {
        let tooth = self.focused_tooth();
        let change = match self.view {
            ChartView::Flat => {
                self.controller
                    .apply_surface_click(&mut self.chart, tooth, self.cursor.surface)
            }
            ChartView::Aggregate => self.controller.apply_tooth_click(&mut self.chart, tooth),
        };
        self.record_change(&change);
        change
    }

    /// Updates dirty flag and status line after a click.
    pub fn record_change(&mut self, change: &ChartChange) {
        if change.is_noop() {
            self.set_status(format!("Tooth {}: no change", change.tooth));
            return;
        }

        self.mark_dirty();
        let message = match change.tool.treatment() {
            Some(kind) if change.changed_surfaces().count() > 1 => {
                format!("Tooth {}: {}", change.tooth, kind.display_name())
            }
            Some(kind) => format!(
                "Tooth {}: {} on {}",
                change.tooth,
                kind.display_name(),
                change.surface
            ),
            None => format!("Tooth {}: erased {}", change.tooth, change.surface),
        };
        self.set_status(message);
    }

    /// Where Ctrl+S writes: the opened file, or a new file in the charts
    /// directory named after the patient.
    pub fn save_target(&self) -> Result<PathBuf> {
        if let Some(path) = &self.source_path {
            return Ok(path.clone());
        }
        let dir = self.config.charts_dir()?;
        let name = ChartService::suggested_filename(&self.metadata.patient);
        Ok(ChartService::path_for(&dir, &name))
    }

    /// Saves the chart and remembers the target for later saves.
    pub fn save(&mut self) -> Result<PathBuf> {
        let path = self.save_target()?;
        self.metadata.touch();
        let document = ChartDocument::new(self.metadata.clone(), &self.chart);
        ChartService::save(&document, &path)?;

        self.source_path = Some(path.clone());
        self.mark_clean();
        Ok(path)
    }
}

/// Initialize terminal for TUI.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal mode.
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main TUI event loop.
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    info!("Chart editor started for {}", state.metadata.display_label());

    loop {
        let frame = terminal.draw(|f| render(f, state))?;
        let areas = screen_layout(frame.area);
        state.chart_area = areas[1];
        state.palette_area = areas[2];

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            let quit = match event::read()? {
                Event::Key(key) => handle_key_event(state, key)?,
                Event::Mouse(mouse) => handlers::handle_mouse_event(state, mouse)?,
                // Terminal resized or focus change, will re-render on next loop
                _ => false,
            };
            if quit {
                break;
            }
        }

        if state.should_quit {
            break;
        }
    }

    info!("Chart editor closed");
    Ok(())
}

/// Splits the screen into title, chart, palette and status areas.
#[must_use]
pub fn screen_layout(area: Rect) -> [Rect; 4] {
    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                  // Title bar
            Constraint::Min(CHART_PANEL_HEIGHT),    // Chart
            Constraint::Length(3),                  // Tool palette
            Constraint::Length(4),                  // Status bar
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Render the UI.
pub fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let [title, chart, palette, status] = screen_layout(f.area());

    render_title_bar(f, title, state);
    ChartWidget::render(f, chart, state);
    PaletteWidget::render(f, palette, state);
    StatusBar::render(f, status, state, &state.theme);

    match state.active_popup {
        Some(PopupType::HelpOverlay) => HelpOverlay::render(f, f.area(), state),
        Some(PopupType::UnsavedChangesPrompt) => render_unsaved_prompt(f, &state.theme),
        None => {}
    }

    // Error overlay on top of everything
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with patient label, view and dirty indicator
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let dirty_indicator = if state.dirty { " *" } else { "" };
    let title = format!(
        " {} - {} view{}",
        state.metadata.display_label(),
        state.view.display_name(),
        dirty_indicator
    );

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

fn render_unsaved_prompt(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(50, 30, f.area());

    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let text = vec![
        Line::from(""),
        Line::from("The chart has unsaved changes."),
        Line::from(""),
        Line::from("  [S] Save and quit"),
        Line::from("  [Q] Quit without saving"),
        Line::from("  [Esc] Cancel"),
    ];

    let prompt = Paragraph::new(text).block(
        Block::default()
            .title(" Unsaved Changes ")
            .borders(Borders::ALL)
            .style(Style::default().fg(theme.warning)),
    );

    f.render_widget(prompt, area);
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(60, 30, f.area());

    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    " ERROR ",
                    Style::default()
                        .fg(theme.error)
                        .add_modifier(Modifier::BOLD),
                ))
                .style(Style::default().fg(theme.error).bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[0]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(
            " Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Dismiss"),
    ]))
    .style(Style::default().fg(theme.text).bg(theme.background));
    f.render_widget(help, chunks[1]);
}

/// Centered sub-rectangle, sized in percent of `r`.
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Handle keyboard input events. Returns `true` to quit.
pub fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    use crossterm::event::{KeyCode, KeyEventKind};

    // Windows reports both press and release
    if key.kind == KeyEventKind::Release {
        return Ok(false);
    }

    // Error overlay blocks all input until dismissed
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        return Ok(false);
    }

    if state.active_popup.is_some() {
        return handlers::handle_popup_input(state, key);
    }

    handlers::handle_main_input(state, key)
}
