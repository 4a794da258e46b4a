//! Preferences
//!
//! Cross-cutting UI state for the shell, modelled as small owned containers
//! that are injected into the views that need them, plus the persisted
//! preference document they are initialized from. Nothing here is ambient:
//! each view receives exactly the containers it reads or mutates.

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or saving preferences.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// IO error reading or writing the preference file.
    #[error("failed to read or write preferences: {0}")]
    Io(#[from] io::Error),

    /// YAML (de)serialization error.
    #[error("failed to parse preferences: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Color theme.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme, the default.
    #[default]
    Light,

    /// Dark theme.
    Dark,
}

/// Owned theme state.
#[derive(Debug, Default)]
pub struct ThemeSetting {
    theme: Theme,
}

impl ThemeSetting {
    /// A container initialized from a persisted preference.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// The current theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether the dark theme is active.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Flips between light and dark.
    pub fn toggle(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
    }

    /// Sets a specific theme.
    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

/// Sidebar expansion state. Collapsed by default;
/// [`apply_viewport`](Self::apply_viewport) expands it on wide screens.
#[derive(Debug, Default)]
pub struct SidebarState {
    expanded: bool,
}

impl SidebarState {
    /// Viewport width (px) at which the sidebar auto-expands.
    pub const EXPAND_BREAKPOINT: u32 = 1024;

    /// A container initialized from a persisted preference.
    #[must_use]
    pub fn new(expanded: bool) -> Self {
        Self { expanded }
    }

    /// Whether the sidebar is expanded.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flips the sidebar open or closed.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Expands on wide viewports and collapses on narrow ones.
    pub fn apply_viewport(&mut self, width: u32) {
        self.expanded = width >= Self::EXPAND_BREAKPOINT;
    }
}

/// Register mode: whether the admin chrome is shown around the cashier
/// screen.
#[derive(Debug, Default)]
pub struct RegisterMode {
    admin: bool,
}

impl RegisterMode {
    /// A container initialized from a persisted preference.
    #[must_use]
    pub fn new(admin: bool) -> Self {
        Self { admin }
    }

    /// Whether admin mode is active.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Flips admin mode.
    pub fn toggle(&mut self) {
        self.admin = !self.admin;
    }

    /// Sets admin mode explicitly.
    pub fn set(&mut self, admin: bool) {
        self.admin = admin;
    }
}

/// The persisted user-preference document.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Preferred color theme.
    pub theme: Theme,

    /// Whether the sidebar starts expanded.
    pub sidebar_expanded: bool,

    /// Whether the register starts in admin mode.
    pub admin_mode: bool,
}

impl Preferences {
    /// Loads preferences, falling back to defaults when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns a [`PrefsError`] when the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;

        Ok(serde_norway::from_str(&contents)?)
    }

    /// Saves preferences.
    ///
    /// # Errors
    ///
    /// Returns a [`PrefsError`] when serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        fs::write(path, serde_norway::to_string(self)?)?;

        Ok(())
    }

    /// Theme container initialized from these preferences.
    #[must_use]
    pub fn theme_setting(&self) -> ThemeSetting {
        ThemeSetting::new(self.theme)
    }

    /// Sidebar container initialized from these preferences.
    #[must_use]
    pub fn sidebar_state(&self) -> SidebarState {
        SidebarState::new(self.sidebar_expanded)
    }

    /// Register-mode container initialized from these preferences.
    #[must_use]
    pub fn register_mode(&self) -> RegisterMode {
        RegisterMode::new(self.admin_mode)
    }
}
