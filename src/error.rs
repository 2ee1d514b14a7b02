// src/error.rs

//! Unified error handling for the feed aggregator.

use std::fmt;

use thiserror::Error;

/// Result type alias for aggregator operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Template compilation or rendering failed
    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    /// Feed document is neither valid RSS nor valid Atom
    #[error("Feed parse error: {0}")]
    FeedParse(String),

    /// A single feed source could not be fetched or parsed
    #[error("Failed to load feed '{source_name}': {message}")]
    SourceFetch {
        source_name: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Feed discovery error
    #[error("Discovery error: {0}")]
    Discovery(String),
}

impl AppError {
    /// Create a feed parse error.
    pub fn feed_parse(message: impl fmt::Display) -> Self {
        Self::FeedParse(message.to_string())
    }

    /// Create a source fetch error naming the offending source.
    pub fn source_fetch(source_name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::SourceFetch {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a discovery error.
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery(message.into())
    }
}
