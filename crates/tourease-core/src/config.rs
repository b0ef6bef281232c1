use crate::favorites::FAVORITES_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Env var that overrides `api.base_url`
pub const API_URL_ENV: &str = "TOUREASE_API_URL";

const APP_DIR: &str = "tourease";

/// Main configuration structure
///
/// Priority: CLI > Env > File > Defaults. The CLI layer applies its own
/// flags on top of whatever `load` returns.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Config {
    /// Load config from the default location, then apply env overrides
    pub fn load() -> crate::Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// Load config from `path`; a missing file means defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply the value of `TOUREASE_API_URL`, if set and non-blank
    pub fn apply_env(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            debug!("Using API URL from {}", API_URL_ENV);
            self.api.base_url = url.trim().to_string();
        }
    }

    /// `<config_dir>/tourease/config.toml`
    pub fn config_path() -> crate::Result<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join(APP_DIR)
            .join("config.toml"))
    }

    /// Where the durable storage lives: the configured path or the data dir default
    pub fn storage_path(&self) -> crate::Result<PathBuf> {
        match &self.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(dirs::data_dir()
                .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?
                .join(APP_DIR)
                .join("storage.db")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the contact backend; `/contact/submit` is appended
    #[serde(default = "default_api_url")]
    pub base_url: String,
}

fn default_api_url() -> String {
    tourease_api::DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// SQLite database file; defaults to the platform data dir
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
}

fn default_favorites_key() -> String {
    FAVORITES_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            favorites_key: default_favorites_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogConfig {
    /// JSON catalog replacing the builtin destinations
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.storage.favorites_key, "favorites");
        assert!(config.storage.path.is_none());
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("base_url"));
        assert!(toml.contains("favorites_key"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"https://api.tourease.test\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://api.tourease.test");
        assert_eq!(config.storage.favorites_key, "favorites");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.storage.path = Some(dir.path().join("storage.db"));
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, crate::Error::ConfigError(_)));
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_env(Some(" https://prod.tourease.test/api ".to_string()));
        assert_eq!(config.api.base_url, "https://prod.tourease.test/api");

        config.apply_env(Some("   ".to_string()));
        assert_eq!(config.api.base_url, "https://prod.tourease.test/api");

        config.apply_env(None);
        assert_eq!(config.api.base_url, "https://prod.tourease.test/api");
    }

    #[test]
    fn test_explicit_storage_path() {
        let mut config = Config::default();
        config.storage.path = Some(PathBuf::from("/tmp/tourease.db"));
        assert_eq!(config.storage_path().unwrap(), PathBuf::from("/tmp/tourease.db"));
    }
}
