//! Light/dark theme preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use teamconnect_core::error::AppError;
use teamconnect_core::result::AppResult;

use crate::preferences::PreferenceStore;

/// Preference key holding the theme.
pub const THEME_KEY: &str = "teamconnect-theme";

/// Page colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light scheme.
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value stored in preferences and set as `data-theme`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Icon on the toggle button. It shows the theme a click switches to.
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Self::Light => "fas fa-moon",
            Self::Dark => "fas fa-sun",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(AppError::validation(format!(
                "Unknown theme '{other}', expected 'light' or 'dark'"
            ))),
        }
    }
}

/// Applies and persists the theme preference.
#[derive(Debug)]
pub struct ThemeManager<S> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemeManager<S> {
    /// Read the saved theme and write the effective one back.
    ///
    /// A missing or unrecognised value falls back to [`Theme::Light`].
    pub fn load(store: S) -> AppResult<Self> {
        let saved = store.get(THEME_KEY);
        let current = match saved.as_deref().map(str::parse::<Theme>) {
            Some(Ok(theme)) => theme,
            Some(Err(e)) => {
                tracing::warn!("Ignoring saved theme: {}", e);
                Theme::Light
            }
            None => Theme::Light,
        };

        let mut manager = Self { store, current };
        manager.set_theme(current)?;
        Ok(manager)
    }

    /// Theme in effect.
    pub fn theme(&self) -> Theme {
        self.current
    }

    /// Icon for the toggle button.
    pub fn toggle_icon(&self) -> &'static str {
        self.current.toggle_icon()
    }

    /// Apply and persist `theme`.
    pub fn set_theme(&mut self, theme: Theme) -> AppResult<()> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.current = theme;
        Ok(())
    }

    /// Switch to the other theme and return it.
    pub fn toggle_theme(&mut self) -> AppResult<Theme> {
        let next = self.current.toggled();
        self.set_theme(next)?;
        tracing::info!("Theme switched to {}", next);
        Ok(next)
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}
