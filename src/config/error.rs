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
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid plan backend URL: {0}")]
    InvalidBackendUrl(String),

    #[error("Invalid generative API URL: {0}")]
    InvalidAiUrl(String),

    #[error("Temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("top_p must be in (0.0, 1.0], got {0}")]
    InvalidTopP(f32),

    #[error("max_output_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("Timeout must be greater than zero when set")]
    InvalidTimeout,
}
