//! Open-Meteo Provider - WeatherProvider backed by the Open-Meteo forecast API.
//!
//! ```text
//! GET {base_url}/v1/forecast?latitude=..&longitude=..&forecast_days=5
//!     &daily=temperature_2m_max,temperature_2m_min,precipitation_probability_max,wind_speed_10m_max
//!     &timezone=auto
//! ```
//!
//! The API answers with parallel daily arrays; days without both
//! temperatures are dropped.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::domain::foundation::Coordinates;
use crate::domain::tools::{DailyForecast, WeatherForecast};
use crate::ports::{WeatherLookupError, WeatherProvider};

const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_probability_max,wind_speed_10m_max";

/// Configuration for the Open-Meteo provider.
#[derive(Debug, Clone)]
pub struct OpenMeteoConfig {
    /// Base URL for the API (default: https://api.open-meteo.com).
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl OpenMeteoConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct OpenMeteoProvider {
    config: OpenMeteoConfig,
    client: Client,
}

impl OpenMeteoProvider {
    pub fn new(config: OpenMeteoConfig) -> Result<Self, WeatherLookupError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WeatherLookupError::network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn forecast_url(&self) -> String {
        format!("{}/v1/forecast", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn forecast(
        &self,
        coordinates: Coordinates,
        days: u32,
    ) -> Result<WeatherForecast, WeatherLookupError> {
        let response = self
            .client
            .get(self.forecast_url())
            .query(&[
                ("latitude", coordinates.latitude().to_string()),
                ("longitude", coordinates.longitude().to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("forecast_days", days.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WeatherLookupError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    WeatherLookupError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherLookupError::Provider {
                status: status.as_u16(),
                message: provider_message(&body),
            });
        }

        let body: OpenMeteoResponse = response
            .json()
            .await
            .map_err(|e| WeatherLookupError::parse(e.to_string()))?;

        let forecast = body.into_forecast(coordinates)?;
        debug!(
            latitude = coordinates.latitude(),
            longitude = coordinates.longitude(),
            days = forecast.days.len(),
            "Weather forecast fetched"
        );
        Ok(forecast)
    }
}

// Open-Meteo reports errors as {"error": true, "reason": "..."}.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("reason").and_then(|r| r.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

// ----- Open-Meteo API Types -----

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: Option<DailySeries>,
}

#[derive(Debug, Deserialize)]
struct DailySeries {
    time: Vec<NaiveDate>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m_max: Vec<Option<f64>>,
}

impl OpenMeteoResponse {
    fn into_forecast(self, coordinates: Coordinates) -> Result<WeatherForecast, WeatherLookupError> {
        let daily = self
            .daily
            .ok_or_else(|| WeatherLookupError::parse("response has no daily series"))?;

        let at = |series: &[Option<f64>], i: usize| series.get(i).copied().flatten();
        let days: Vec<DailyForecast> = daily
            .time
            .iter()
            .enumerate()
            .filter_map(|(i, date)| {
                Some(DailyForecast {
                    date: *date,
                    temp_min_c: at(&daily.temperature_2m_min, i)?,
                    temp_max_c: at(&daily.temperature_2m_max, i)?,
                    precipitation_probability_pct: at(&daily.precipitation_probability_max, i),
                    wind_speed_max_kmh: at(&daily.wind_speed_10m_max, i),
                })
            })
            .collect();

        if days.is_empty() {
            return Err(WeatherLookupError::EmptyForecast);
        }
        Ok(WeatherForecast::new(coordinates, days))
    }
}
