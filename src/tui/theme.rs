//! Terminal colors for dark and light backgrounds.
//!
//! Treatment fills always come from the vocabulary; the theme only covers
//! the chrome drawn around them.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Borders and titles
    pub primary: Color,
    /// Focused tooth and surface
    pub accent: Color,
    /// Confirmation messages
    pub success: Color,
    /// Error messages
    pub error: Color,
    /// Unsaved-changes indicator
    pub warning: Color,

    /// Body text
    pub text: Color,
    /// Tooth numbers and labels
    pub text_secondary: Color,
    /// Hints
    pub text_muted: Color,

    /// Main background
    pub background: Color,
    /// Selected palette entry background
    pub highlight_bg: Color,
    /// Glyph color for the extraction cross
    pub removed_marker: Color,
}

impl Theme {
    /// Detects the OS theme with `dark-light`; anything but an explicit
    /// light mode gets the dark theme.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Theme for a configured mode.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::DarkGray,
            removed_marker: Color::Rgb(60, 60, 60),
        }
    }

    /// Light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0),
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(230, 230, 230),
            removed_marker: Color::Black,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
