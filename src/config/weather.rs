//! Weather provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::weather::OpenMeteoConfig;

/// Shortest and longest forecast horizon offered to the model
pub const FORECAST_DAYS_RANGE: std::ops::RangeInclusive<u32> = 5..=16;

/// Weather forecast configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// Forecast API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Days requested from the provider
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Adapter configuration for the Open-Meteo provider
    pub fn open_meteo(&self) -> OpenMeteoConfig {
        OpenMeteoConfig::default()
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("WEATHER_BASE_URL"));
        }
        if !FORECAST_DAYS_RANGE.contains(&self.forecast_days) {
            return Err(ValidationError::InvalidForecastDays(self.forecast_days));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            forecast_days: default_forecast_days(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_forecast_days() -> u32 {
    5
}

fn default_timeout() -> u64 {
    15
}
