//! Persisted user preferences: cookie-consent categories and the theme
//! choice.
//!
//! Browser-style key/value storage is modeled as the [`PreferenceStore`]
//! trait so the typed load/store helpers stay independent of where the
//! values actually live. Preferences are read once at startup and written
//! on user choice.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key for the consent JSON blob.
pub const CONSENT_KEY: &str = "gdpr-cookie-consent";
/// Storage key for the theme choice.
pub const THEME_KEY: &str = "product-catalog-theme";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preference store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Per-category cookie-consent acceptances.
///
/// `necessary` is always `true`; the category cannot be switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentPreferences {
    pub necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
    pub functional: bool,
}

impl Default for ConsentPreferences {
    fn default() -> Self {
        Self::necessary_only()
    }
}

impl ConsentPreferences {
    /// Only the always-on category accepted.
    #[must_use]
    pub fn necessary_only() -> Self {
        Self {
            necessary: true,
            analytics: false,
            marketing: false,
            functional: false,
        }
    }

    /// Every category accepted.
    #[must_use]
    pub fn accept_all() -> Self {
        Self {
            necessary: true,
            analytics: true,
            marketing: true,
            functional: true,
        }
    }
}

/// Light/dark theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Parse a stored theme string. Unrecognized values fall back to the
    /// default (dark).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Narrow adapter over browser-style key/value preference storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`PrefsError`] if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// In-memory store for tests and headless runs without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed store. The whole map is loaded at open and rewritten
/// on every set.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing or unreadable file starts
    /// empty; a malformed file is discarded with a warning (the next write
    /// replaces it).
    #[must_use]
    pub fn open(path: &Path) -> Self {
        let values = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "discarding malformed preference file");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self {
            path: path.to_path_buf(),
            values,
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        let serialized = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}

/// Reads the recorded consent choices.
///
/// Returns `None` when nothing was recorded yet or the stored payload does
/// not decode — both mean "re-prompt the user", never an error.
#[must_use]
pub fn load_consent(store: &dyn PreferenceStore) -> Option<ConsentPreferences> {
    let raw = store.get(CONSENT_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(prefs) => Some(prefs),
        Err(e) => {
            tracing::warn!(error = %e, "stored consent payload is malformed; treating as unset");
            None
        }
    }
}

/// Records the user's consent choices: the JSON blob plus the individual
/// per-category flags that gate script loading.
///
/// # Errors
///
/// Returns [`PrefsError`] if the backing storage cannot be written.
pub fn store_consent(
    store: &mut dyn PreferenceStore,
    prefs: ConsentPreferences,
) -> Result<(), PrefsError> {
    let blob = serde_json::to_string(&prefs)?;
    store.set(CONSENT_KEY, &blob)?;
    store.set("analytics-consent", &prefs.analytics.to_string())?;
    store.set("marketing-consent", &prefs.marketing.to_string())?;
    store.set("functional-consent", &prefs.functional.to_string())?;
    Ok(())
}

/// Reads the theme preference, defaulting to dark when unset or
/// unrecognized.
#[must_use]
pub fn load_theme(store: &dyn PreferenceStore) -> Theme {
    store
        .get(THEME_KEY)
        .map_or_else(Theme::default, |raw| Theme::parse(&raw))
}

/// Records the theme preference.
///
/// # Errors
///
/// Returns [`PrefsError`] if the backing storage cannot be written.
pub fn store_theme(store: &mut dyn PreferenceStore, theme: Theme) -> Result<(), PrefsError> {
    store.set(THEME_KEY, theme.as_str())
}
