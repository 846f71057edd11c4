//! Custom error types for show-browser.
//!
//! Fetch failures come in two kinds, network and parse, and both are
//! treated the same way by the navigator.

use std::io;
use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Transport failure or a non-success HTTP status
    #[error("Network error: {0}")]
    Network(String),
    /// Response body was not valid JSON or failed validation
    #[error("Parse error: {0}")]
    Parse(String),
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    /// Whether this error came from fetching catalog data.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Parse(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
