//! Dark/light display mode

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use super::store::PreferenceStore;
use crate::error::PlayerError;

/// Key the display mode is stored under
pub const THEME_KEY: &str = "theme";

/// Display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeMode {
    /// Dark background
    #[default]
    Dark,
    /// Light background
    Light,
}

impl ThemeMode {
    /// Stored representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The other mode
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = PlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(PlayerError::InvalidConfig {
                message: format!("unknown theme mode: {other}"),
            }),
        }
    }
}

/// Holds the active display mode and persists user choices
pub struct ThemeController<S> {
    store: S,
    mode: ThemeMode,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Resolve the initial mode
    ///
    /// A saved preference wins over the system appearance. If the store
    /// cannot be read the mode falls back to dark.
    pub async fn load(store: S, system: ThemeMode) -> Self {
        let mode = match store.get(THEME_KEY).await {
            Ok(Some(saved)) => saved.parse::<ThemeMode>().unwrap_or_else(|e| {
                warn!("Ignoring saved theme: {}", e);
                system
            }),
            Ok(None) => system,
            Err(e) => {
                warn!("Failed to load theme: {}", e);
                ThemeMode::Dark
            }
        };

        debug!("Theme mode {}", mode);
        Self { store, mode }
    }

    /// Active mode
    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Check if dark mode is active
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Flip the mode and persist it
    ///
    /// The new mode takes effect even if saving fails.
    pub async fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        if let Err(e) = self.store.set(THEME_KEY, self.mode.as_str()).await {
            warn!("Failed to save theme: {}", e);
        }
        self.mode
    }

    /// Follow a system appearance change unless the user chose a mode
    pub async fn on_system_change(&mut self, system: ThemeMode) -> ThemeMode {
        match self.store.get(THEME_KEY).await {
            Ok(None) => {
                debug!("Following system theme {}", system);
                self.mode = system;
            }
            Ok(Some(_)) => {}
            Err(e) => warn!("Failed to read theme preference: {}", e),
        }
        self.mode
    }

    /// Backing store
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
