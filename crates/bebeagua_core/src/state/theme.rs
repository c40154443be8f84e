//! Dark-mode preference slice.

use serde::{Deserialize, Serialize};

/// Tri-state dark mode plus the startup loading flag.
///
/// `dark_mode == None` defers to the scheme reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeState {
    pub dark_mode: Option<bool>,
    pub is_loading: bool,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            dark_mode: None,
            is_loading: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    SetDarkMode(Option<bool>),
    SetLoading(bool),
}

pub fn reduce(state: &ThemeState, action: ThemeAction) -> ThemeState {
    let mut next = *state;
    match action {
        ThemeAction::SetDarkMode(value) => next.dark_mode = value,
        ThemeAction::SetLoading(value) => next.is_loading = value,
    }
    next
}

/// Color scheme reported by the OS or chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ThemeState {
    /// Resolves the scheme to render: explicit preference first, then the OS.
    pub fn effective_scheme(&self, system: Option<ColorScheme>) -> ColorScheme {
        match self.dark_mode {
            Some(true) => ColorScheme::Dark,
            Some(false) => ColorScheme::Light,
            None => system.unwrap_or(ColorScheme::Light),
        }
    }
}
