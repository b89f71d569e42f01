//! Light/dark theme preference.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::storage::{KeyValueStore, THEME_KEY};
use crate::Error;

/// Display theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// The opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stored and wire form, `"light"` or `"dark"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// CSS class applied to the document root.
    pub fn css_class(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::validation(format!("unknown theme: {}", other))),
        }
    }
}

/// Holds the current theme and persists changes.
pub struct ThemeContext {
    store: Arc<dyn KeyValueStore>,
    theme: RwLock<Theme>,
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext").field("theme", &*self.theme.read()).finish_non_exhaustive()
    }
}

impl ThemeContext {
    /// Loads the persisted theme. Missing or unreadable values fall back to
    /// [`Theme::Light`].
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_fallback(store, Theme::default())
    }

    /// Loads the persisted theme, using `fallback` when nothing usable is
    /// stored. Pass the system colour-scheme preference here.
    pub fn with_fallback(store: Arc<dyn KeyValueStore>, fallback: Theme) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|err: Error| {
                tracing::warn!(error = %err, "ignoring stored theme");
                fallback
            }),
            Ok(None) => fallback,
            Err(err) => {
                tracing::warn!(error = %err, "could not read stored theme");
                fallback
            },
        };

        Self { store, theme: RwLock::new(theme) }
    }

    /// Returns the current theme.
    pub fn theme(&self) -> Theme {
        *self.theme.read()
    }

    /// Sets and persists the theme.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the theme could not be persisted; the
    /// in-memory theme is still updated.
    pub fn set(&self, theme: Theme) -> Result<(), Error> {
        *self.theme.write() = theme;
        tracing::debug!(%theme, "theme changed");
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Switches between light and dark and returns the new theme.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set).
    pub fn toggle(&self) -> Result<Theme, Error> {
        let next = {
            let mut theme = self.theme.write();
            *theme = theme.toggled();
            *theme
        };
        tracing::debug!(theme = %next, "theme changed");
        self.store.set(THEME_KEY, next.as_str())?;
        Ok(next)
    }

    /// CSS class of the current theme.
    pub fn css_class(&self) -> &'static str {
        self.theme().css_class()
    }
}
