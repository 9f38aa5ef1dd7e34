//! Error types for the level alert bot

use thiserror::Error;

/// Level alert errors
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("HTTP request error: {0}")]
    Request(String),

    #[error("Quote API rejected the access token (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("Quote API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Notifier error: {0}")]
    NotifierError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server I/O error: {0}")]
    IoError(String),
}

impl AlertError {
    /// Whether this error means the access token must be refreshed by hand
    pub fn is_auth(&self) -> bool {
        matches!(self, AlertError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for AlertError {
    fn from(err: reqwest::Error) -> Self {
        AlertError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for AlertError {
    fn from(err: serde_json::Error) -> Self {
        AlertError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for AlertError {
    fn from(err: std::io::Error) -> Self {
        AlertError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AlertError>;
