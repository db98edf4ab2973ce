//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host address")]
    InvalidHost,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(&'static str),

    #[error("Invalid URL (must be http or https): {0}")]
    InvalidUrl(&'static str),

    #[error("Model retries must be at most {max}")]
    TooManyRetries { max: u32 },

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("History limit must be greater than zero: {0}")]
    InvalidHistoryLimit(&'static str),

    #[error("Chunk overlap must be smaller than chunk size")]
    InvalidChunking,

    #[error("Retrieval top_k must be greater than zero")]
    InvalidTopK,

    #[error("Support number allowlist is empty")]
    EmptySupportNumbers,

    #[error("Alert suffix must be non-empty and contain no '@'")]
    InvalidAlertSuffix,

    #[error("Tag marker must start with '|||' and name a tag: {0}")]
    InvalidTagMarker(&'static str),

    #[error("Trigger phrase must not be empty: {0}")]
    EmptyTriggerPhrase(&'static str),
}
