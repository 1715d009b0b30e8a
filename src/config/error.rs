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

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid endpoint URL for {0}")]
    InvalidEndpoint(&'static str),

    #[error("QnA score threshold must be between 0 and 1")]
    InvalidScoreThreshold,

    #[error("QnA top must be between 1 and 100")]
    InvalidTop,

    #[error("Request timeout ({request_secs}s) must exceed the QnA and sentiment timeouts combined ({turn_secs}s)")]
    RequestTimeoutTooShort { request_secs: u64, turn_secs: u64 },
}
