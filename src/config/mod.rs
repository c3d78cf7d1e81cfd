//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BERRY_SHERPA` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use berry_sherpa::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Forecast horizon: {} days", config.weather.forecast_days);
//! ```

mod advisor;
mod ai;
mod error;
mod report;
mod weather;

pub use advisor::AdvisorConfig;
pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use report::{Environment, ReportConfig};
pub use weather::{WeatherConfig, FORECAST_DAYS_RANGE};

use serde::Deserialize;

use crate::application::FlowSettings;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads. Only
/// [`AppConfig::validate()`] enforces the API key for the Anthropic provider.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// AI provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Weather forecast provider
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Decision flow limits
    #[serde(default)]
    pub advisor: AdvisorConfig,

    /// Report binary settings
    #[serde(default)]
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BERRY_SHERPA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `BERRY_SHERPA__AI__ANTHROPIC_API_KEY=...` -> `ai.anthropic_api_key = ...`
    /// - `BERRY_SHERPA__WEATHER__FORECAST_DAYS=7` -> `weather.forecast_days = 7`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BERRY_SHERPA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.weather.validate()?;
        self.advisor.validate()?;
        Ok(())
    }

    /// Tunables for the flow runner
    pub fn flow_settings(&self) -> FlowSettings {
        FlowSettings {
            max_tool_rounds: self.advisor.max_tool_rounds,
            window_days: self.advisor.window_days,
            max_entries: self.advisor.max_entries,
            max_tokens: self.ai.max_tokens,
            temperature: self.ai.temperature,
        }
    }
}
