//! Locally persisted UI preferences

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::storage::{KeyValueStoreExt, SharedStore};

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        };
        f.write_str(name)
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(Error::validation(format!("Nieznany motyw: {}", other))),
        }
    }
}

/// Preferences read from the store when created
pub struct Preferences {
    store: SharedStore,
    theme: Theme,
}

impl Preferences {
    pub fn load(store: SharedStore) -> Result<Self> {
        let theme = store.get_as::<Theme>(THEME_KEY)?.unwrap_or_default();
        Ok(Self { store, theme })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.store.set_as(THEME_KEY, &theme)?;
        self.theme = theme;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn defaults_to_system() {
        let prefs = Preferences::load(Arc::new(MemoryStore::new())).unwrap();
        assert_eq!(prefs.theme(), Theme::System);
    }

    #[test]
    fn theme_is_persisted() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let mut prefs = Preferences::load(store.clone()).unwrap();
        prefs.set_theme(Theme::Dark).unwrap();

        let reloaded = Preferences::load(store).unwrap();
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn parses_theme_names() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
