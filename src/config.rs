//! Configuration file support for show-browser.
//!
//! This module provides functionality for loading and saving user preferences
//! from a TOML configuration file.

use crate::api::DEFAULT_BASE_URL;
use crate::error::{AppError, Result};
use crate::filter::EmptyResults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "show-browser";

/// User configuration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// What to display when a search matches nothing
    #[serde(default)]
    pub empty_results: EmptyResults,

    /// Transport timeout for catalog requests, in seconds
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Show to open right after the show list loads
    #[serde(default)]
    pub startup_show: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self {
            base_url: default_base_url(),
            empty_results: EmptyResults::default(),
            request_timeout_secs: None,
            startup_show: None,
        }
    }

    /// The configured request timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Get the path to the config file.
    ///
    /// Returns ~/.config/show-browser/config.toml on Linux,
    /// or a platform-appropriate location on other systems.
    pub fn get_config_path() -> std::result::Result<PathBuf, io::Error> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?
            .join(APP_DIR);

        Ok(config_dir.join("config.toml"))
    }

    /// Default log file location.
    pub fn default_log_path() -> std::result::Result<PathBuf, io::Error> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find data directory")
            })?
            .join(APP_DIR);

        Ok(data_dir.join("show-browser.log"))
    }

    /// Load config from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load config from `path`, falling back to defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to `path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Create a default config file if one doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn create_default_if_missing() -> Result<PathBuf> {
        let path = Self::get_config_path()?;
        Self::write_default_at(&path)?;
        Ok(path)
    }

    /// Write the default config to `path` unless a file is already there.
    ///
    /// Returns whether a file was written.
    pub fn write_default_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::new().save_to(path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config_has_defaults() {
        let config = Config::new();
        assert_eq!(config.base_url, "https://api.tvmaze.com");
        assert_eq!(config.empty_results, EmptyResults::ShowEmpty);
        assert!(config.request_timeout().is_none());
        assert!(config.startup_show.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            base_url: "http://localhost:8080".to_string(),
            empty_results: EmptyResults::ShowAll,
            request_timeout_secs: Some(15),
            startup_show: Some(82),
        };

        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("base_url = \"http://localhost:8080\""));
        assert!(toml_str.contains("empty_results = \"show-all\""));
        assert!(toml_str.contains("request_timeout_secs = 15"));
        assert!(toml_str.contains("startup_show = 82"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            base_url = "https://catalog.example"
            empty_results = "show-all"
            request_timeout_secs = 10
            startup_show = 82
        "#;

        let config = Config::parse(toml_str).unwrap();
        assert_eq!(config.base_url, "https://catalog.example");
        assert_eq!(config.empty_results, EmptyResults::ShowAll);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.startup_show, Some(82));
    }

    #[test]
    fn test_config_partial_deserialization() {
        // Only specify some fields, rest should use defaults
        let toml_str = r#"
            startup_show = 1
        "#;

        let config = Config::parse(toml_str).unwrap();
        assert_eq!(config.startup_show, Some(1));
        assert_eq!(config.base_url, "https://api.tvmaze.com"); // default
        assert_eq!(config.empty_results, EmptyResults::ShowEmpty); // default
    }

    #[test]
    fn test_config_rejects_unknown_policy() {
        let err = Config::parse("empty_results = \"sometimes\"").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_default_config_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("show-browser").join("config.toml");

        assert!(Config::write_default_at(&path).unwrap());
        assert_eq!(Config::load_from(&path).unwrap(), Config::new());

        fs::write(&path, "startup_show = 82\n").unwrap();
        assert!(!Config::write_default_at(&path).unwrap());
        assert_eq!(Config::load_from(&path).unwrap().startup_show, Some(82));
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            empty_results: EmptyResults::ShowAll,
            request_timeout_secs: Some(5),
            ..Config::new()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::new());
    }
}
