//! Lookup of the user's configured combination text per setting key.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Source of the currently configured combination for a setting key.
///
/// Queried on every dispatch attempt, so changes apply on the next keypress.
pub trait SettingsProvider {
    /// The combination text for `key`, or `None` if unset.
    fn get_user_setting(&self, key: &str) -> Option<String>;
}

impl<F> SettingsProvider for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get_user_setting(&self, key: &str) -> Option<String> {
        self(key)
    }
}

impl SettingsProvider for HashMap<String, String> {
    fn get_user_setting(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Error loading shortcut settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Shortcut settings backed by a TOML file.
///
/// ```toml
/// [shortcuts]
/// save = "Ctrl+S"
/// submit = "Ctrl+Enter"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShortcutSettings {
    #[serde(default)]
    pub shortcuts: HashMap<String, String>,
}

impl ShortcutSettings {
    /// Load from the default config path, falling back to empty settings.
    pub fn load(app_name: &str) -> Self {
        match Self::config_path(app_name) {
            Some(path) if path.exists() => Self::from_path(&path).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load shortcut settings");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn config_path(app_name: &str) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", app_name)
            .map(|d| d.config_dir().join("shortcuts.toml"))
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(s)?)
    }

    /// Set the combination for a setting key.
    pub fn set(&mut self, key: impl Into<String>, combination: impl Into<String>) {
        self.shortcuts.insert(key.into(), combination.into());
    }
}

impl SettingsProvider for ShortcutSettings {
    fn get_user_setting(&self, key: &str) -> Option<String> {
        self.shortcuts.get(key).filter(|s| !s.is_empty()).cloned()
    }
}
