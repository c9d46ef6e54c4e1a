//! Settings persistence
//!
//! Emulates the host's per-skill settings mechanism: the whole skill
//! state is one JSON document, read at startup and flushed verbatim on
//! every store() call.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{EntityStore, UtteranceStore};

/// All persisted skill state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Unmatched utterances and their taught answers, per language
    #[serde(default)]
    pub db: UtteranceStore,
    /// Known entity values, per language
    #[serde(default)]
    pub entities: EntityStore,
}

/// JSON-file-backed settings store.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Settings store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load settings, or defaults if no file exists yet.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            debug!("No settings at {}, starting empty", self.path.display());
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    /// Flush the whole state verbatim.
    pub fn store(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(settings)
            .context("Failed to serialize settings")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("settings.json"));
        let settings = store.load().unwrap();
        assert!(settings.db.is_empty());
        assert!(settings.entities.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("settings.json"));

        let mut settings = Settings::default();
        settings.db.add_answer("en-us", "what is love", "a feeling");
        settings.entities.add_value("en-us", "city", "london");
        store.store(&settings).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("deep/nested/settings.json"));
        store.store(&Settings::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        let store = SettingsStore::at(&path);
        assert!(store.load().is_err());
    }
}
