//! Centralized shortcut and action system.
//!
//! This module maps key events to actions per input context, and is the
//! single source for the help overlay's key listing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::models::{Tool, TreatmentKind};

/// Input context for the chart screen.
pub const CONTEXT_MAIN: &str = "main";
/// Input context for the unsaved-changes prompt.
pub const CONTEXT_UNSAVED: &str = "unsaved";

/// All possible actions in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === NAVIGATION ===
    /// Move to the other arcade
    NavigateUp,
    /// Move to the other arcade
    NavigateDown,
    /// Previous tooth in the arcade
    NavigateLeft,
    /// Next tooth in the arcade
    NavigateRight,
    /// First tooth of the arcade
    JumpToFirst,
    /// Last tooth of the arcade
    JumpToLast,
    /// Focus the next surface
    NextSurface,
    /// Focus the previous surface
    PreviousSurface,

    // === CHARTING ===
    /// Pick a palette tool
    SelectTool(Tool),
    /// Click the focused surface (flat view) or tooth (aggregate view)
    Apply,
    /// Remove every treatment from the focused tooth
    ClearTooth,
    /// Switch between flat and aggregate views
    ToggleView,

    // === FILE OPERATIONS ===
    /// Save the chart document
    Save,
    /// Quit (prompts when there are unsaved changes)
    Quit,
    /// Save and quit from the unsaved prompt
    SaveAndQuit,
    /// Quit without saving from the unsaved prompt
    DiscardAndQuit,

    // === HELP ===
    /// Show or hide the help overlay
    ToggleHelp,

    // === GENERAL ===
    /// Close the active popup or clear the error
    Cancel,
}

impl Action {
    /// Short description shown in the help overlay.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::NavigateUp | Self::NavigateDown => "Switch arcade".to_string(),
            Self::NavigateLeft => "Previous tooth".to_string(),
            Self::NavigateRight => "Next tooth".to_string(),
            Self::JumpToFirst => "First tooth".to_string(),
            Self::JumpToLast => "Last tooth".to_string(),
            Self::NextSurface => "Next surface".to_string(),
            Self::PreviousSurface => "Previous surface".to_string(),
            Self::SelectTool(tool) => format!("Select tool: {}", tool.display_name()),
            Self::Apply => "Apply tool".to_string(),
            Self::ClearTooth => "Clear tooth".to_string(),
            Self::ToggleView => "Toggle surface / whole-tooth view".to_string(),
            Self::Save => "Save chart".to_string(),
            Self::Quit => "Quit".to_string(),
            Self::SaveAndQuit => "Save and quit".to_string(),
            Self::DiscardAndQuit => "Quit without saving".to_string(),
            Self::ToggleHelp => "Toggle help".to_string(),
            Self::Cancel => "Cancel".to_string(),
        }
    }
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Modifier keys
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a KeyEvent.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }

    /// Human-readable key label ("Ctrl+S", "Tab", "3").
    #[must_use]
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            other => format!("{other:?}"),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", key.to_uppercase())
        } else {
            key
        }
    }
}

/// Shortcut registry that maps key events to actions for a given context.
pub struct ShortcutRegistry {
    /// Maps (context, key_binding) to Action
    bindings: HashMap<(String, KeyBinding), Action>,
}

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };

        registry.register_main_shortcuts();
        registry.register_unsaved_shortcuts();
        registry
    }

    fn register_main_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = CONTEXT_MAIN;

        // === NAVIGATION ===
        self.register(ctx, K::Up, M::NONE, Action::NavigateUp);
        self.register(ctx, K::Down, M::NONE, Action::NavigateDown);
        self.register(ctx, K::Left, M::NONE, Action::NavigateLeft);
        self.register(ctx, K::Right, M::NONE, Action::NavigateRight);
        self.register(ctx, K::Char('k'), M::NONE, Action::NavigateUp);
        self.register(ctx, K::Char('j'), M::NONE, Action::NavigateDown);
        self.register(ctx, K::Char('h'), M::NONE, Action::NavigateLeft);
        self.register(ctx, K::Char('l'), M::NONE, Action::NavigateRight);
        self.register(ctx, K::Home, M::NONE, Action::JumpToFirst);
        self.register(ctx, K::End, M::NONE, Action::JumpToLast);
        self.register(ctx, K::Tab, M::NONE, Action::NextSurface);
        self.register(ctx, K::BackTab, M::SHIFT, Action::PreviousSurface);
        self.register(ctx, K::BackTab, M::NONE, Action::PreviousSurface);

        // === TOOLS (palette order) ===
        for (i, kind) in TreatmentKind::ALL.into_iter().enumerate() {
            let digit = char::from_digit(i as u32 + 1, 10).unwrap_or('?');
            self.register(ctx, K::Char(digit), M::NONE, Action::SelectTool(Tool::Apply(kind)));
        }
        self.register(ctx, K::Char('0'), M::NONE, Action::SelectTool(Tool::Erase));
        self.register(ctx, K::Char('e'), M::NONE, Action::SelectTool(Tool::Erase));

        // === CHARTING ===
        self.register(ctx, K::Enter, M::NONE, Action::Apply);
        self.register(ctx, K::Char(' '), M::NONE, Action::Apply);
        self.register(ctx, K::Char('x'), M::NONE, Action::ClearTooth);
        self.register(ctx, K::Delete, M::NONE, Action::ClearTooth);
        self.register(ctx, K::Char('v'), M::NONE, Action::ToggleView);

        // === FILE OPERATIONS ===
        self.register(ctx, K::Char('s'), M::CONTROL, Action::Save);
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);

        // === HELP ===
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);

        // === GENERAL ===
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
    }

    fn register_unsaved_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = CONTEXT_UNSAVED;
        self.register(ctx, K::Char('s'), M::NONE, Action::SaveAndQuit);
        self.register(ctx, K::Char('q'), M::NONE, Action::DiscardAndQuit);
        self.register(ctx, K::Char('y'), M::NONE, Action::DiscardAndQuit);
        self.register(ctx, K::Char('n'), M::NONE, Action::Cancel);
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
    }

    /// Register a shortcut binding.
    fn register(&mut self, context: &str, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context.to_string(), binding), action);
    }

    /// Look up an action for a given context and key event.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings.get(&(context.to_string(), binding)).copied()
    }

    /// Bindings of one context grouped by action, sorted for display.
    #[must_use]
    pub fn help_entries(&self, context: &str) -> Vec<(String, String)> {
        let mut grouped: Vec<(Action, Vec<String>)> = Vec::new();
        for ((ctx, binding), action) in &self.bindings {
            if ctx != context {
                continue;
            }
            match grouped.iter_mut().find(|(a, _)| a == action) {
                Some((_, keys)) => keys.push(binding.label()),
                None => grouped.push((*action, vec![binding.label()])),
            }
        }

        let mut entries: Vec<(String, String)> = grouped
            .into_iter()
            .map(|(action, mut keys)| {
                keys.sort();
                keys.dedup();
                (keys.join(" / "), action.description())
            })
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1));
        entries
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
