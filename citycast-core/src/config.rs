use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Platform directories shared by the config file and the settings store.
pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "citycast", "citycast")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

/// Endpoints and HTTP behaviour of the weather client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Top-level configuration stored on disk. Every field is optional.
///
/// Example TOML:
/// ```toml
/// default_city = "London"
/// forecast_hours = 6
///
/// [api]
/// timeout_secs = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City shown on the home screen.
    pub default_city: String,
    /// Number of entries in the forecast strip.
    pub forecast_hours: usize,
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: "Dublin".to_string(),
            forecast_hours: 5,
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Load config from the platform location, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg.default_city, "Dublin");
        assert_eq!(cfg.forecast_hours, 5);
        assert_eq!(cfg.api.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.api.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.api.timeout_secs, 10);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_city = \"London\"\n\n[api]\ntimeout_secs = 3\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.default_city, "London");
        assert_eq!(cfg.forecast_hours, 5);
        assert_eq!(cfg.api.timeout_secs, 3);
        assert_eq!(cfg.api.forecast_url, DEFAULT_FORECAST_URL);
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "forecast_hours = \"many\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
