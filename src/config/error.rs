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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid URL format: {0}")]
    InvalidUrl(&'static str),

    #[error("Forecast horizon must be between 5 and 16 days, got {0}")]
    InvalidForecastDays(u32),

    #[error("Temperature must be between 0 and 1")]
    InvalidTemperature,

    #[error("max_tokens must be at least 1")]
    InvalidMaxTokens,

    #[error("{0} must be at least 1")]
    MustBePositive(&'static str),
}
