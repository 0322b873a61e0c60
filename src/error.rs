// src/error.rs

//! Unified error handling for the crawler application.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawler operations.
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

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A listing page or archive endpoint could not be fetched
    #[error("Source unavailable for {context}: {message}")]
    SourceUnavailable { context: String, message: String },

    /// An archive or per-tag sample exceeded its byte ceiling
    #[error("Size limit exceeded for {context}: {actual} > {limit} bytes")]
    SizeLimit {
        context: String,
        limit: u64,
        actual: u64,
    },

    /// An archive or entry could not be decoded
    #[error("Decode failure for {context}: {message}")]
    Decode { context: String, message: String },

    /// A checkpoint or corpus write failed
    #[error("Persistence failure for {target}: {message}")]
    Persistence { target: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
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

    /// Create a source-unavailable error with context.
    pub fn source_unavailable(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::SourceUnavailable {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a size-limit error with context.
    pub fn size_limit(context: impl Into<String>, limit: u64, actual: u64) -> Self {
        Self::SizeLimit {
            context: context.into(),
            limit,
            actual,
        }
    }

    /// Create a decode error with context.
    pub fn decode(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a persistence error with context.
    pub fn persistence(target: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Persistence {
            target: target.into(),
            message: message.to_string(),
        }
    }
}
