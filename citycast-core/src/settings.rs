use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{config::project_dirs, model::UnitPreference};

/// On-disk shape: a single `unitPreference` key.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(rename = "unitPreference", default)]
    unit_preference: UnitPreference,
}

/// Persistent store for the unit preference.
///
/// Loaded once when opened; every update is written through to disk.
/// Screens that need the preference receive a reference to the store.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    preferences: Preferences,
}

impl SettingsStore {
    pub fn open() -> Result<Self> {
        Self::open_at(Self::default_path()?)
    }

    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let preferences = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse settings file: {}", path.display()))?
        } else {
            Preferences::default()
        };

        tracing::debug!(path = %path.display(), unit = %preferences.unit_preference, "settings loaded");
        Ok(Self { path, preferences })
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("preferences.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn unit(&self) -> UnitPreference {
        self.preferences.unit_preference
    }

    /// Change the preference and persist it, creating parent directories as needed.
    pub fn set_unit(&mut self, unit: UnitPreference) -> Result<()> {
        let updated = Preferences { unit_preference: unit };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(&updated).context("Failed to serialize settings to TOML")?;
        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write settings file: {}", self.path.display()))?;

        self.preferences = updated;
        tracing::info!(%unit, "unit preference updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_metric_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::open_at(dir.path().join("preferences.toml")).unwrap();
        assert_eq!(store.unit(), UnitPreference::Metric);
    }

    #[test]
    fn set_unit_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut store = SettingsStore::open_at(&path).unwrap();
        store.set_unit(UnitPreference::Imperial).unwrap();
        assert_eq!(store.unit(), UnitPreference::Imperial);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("unitPreference = \"imperial\""));

        let reopened = SettingsStore::open_at(&path).unwrap();
        assert_eq!(reopened.unit(), UnitPreference::Imperial);
    }

    #[test]
    fn toggling_back_writes_metric() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");

        let mut store = SettingsStore::open_at(&path).unwrap();
        store.set_unit(UnitPreference::Imperial).unwrap();
        store.set_unit(UnitPreference::Metric).unwrap();

        assert_eq!(SettingsStore::open_at(&path).unwrap().unit(), UnitPreference::Metric);
    }

    #[test]
    fn unknown_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "unitPreference = \"kelvin\"\n").unwrap();

        let err = SettingsStore::open_at(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }
}
