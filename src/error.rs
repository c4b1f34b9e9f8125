// src/error.rs

//! Unified error handling for the wiki extraction layer.

use std::fmt;

use thiserror::Error;

/// Result type alias for wiki operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed (transport error or non-2xx status)
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

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// API response did not have the expected shape
    #[error("Unexpected response for {context}: {message}")]
    Shape { context: String, message: String },

    /// The wiki reported the page as missing
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Image special-page lookup failed
    #[error("Image not found: {0}")]
    ImageNotFound(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a response-shape error with context.
    pub fn shape(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Shape {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
