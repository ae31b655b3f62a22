//! Custom error types for show-browser.
//!
//! Failures inside the browsing engine are logged and degraded to empty
//! results; this enum is what travels between the transport, the cache and
//! the loaders before that happens.

use std::error::Error;
use std::fmt;
use std::io;

/// Application error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Network failure or non-success HTTP status for a request.
    Fetch {
        /// The request that failed.
        url: String,
        /// Transport error text or the offending status.
        reason: String,
    },
    /// Response body could not be decoded
    Parse(String),
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(String),
}

impl AppError {
    /// Build a fetch failure for `url`.
    pub fn fetch(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        AppError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Fetch { url, reason } => write!(f, "Failed to fetch {}: {}", url, reason),
            AppError::Parse(msg) => write!(f, "Parse error: {}", msg),
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl Error for AppError {}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        AppError::fetch(url, err)
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
