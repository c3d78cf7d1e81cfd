//! Stub Weather Provider for testing.
//!
//! Returns a fixed forecast or a configured failure and records every
//! lookup for verification.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use std::sync::{Arc, Mutex};

use crate::domain::foundation::Coordinates;
use crate::domain::tools::{DailyForecast, WeatherForecast};
use crate::ports::{WeatherLookupError, WeatherProvider};

#[derive(Debug, Clone)]
enum StubOutcome {
    Forecast(Vec<DailyForecast>),
    Failure(WeatherLookupError),
}

#[derive(Debug, Clone)]
pub struct StubWeatherProvider {
    outcome: StubOutcome,
    calls: Arc<Mutex<Vec<(Coordinates, u32)>>>,
}

impl StubWeatherProvider {
    /// Answers every lookup with `days` (truncated to the requested horizon).
    pub fn with_days(days: Vec<DailyForecast>) -> Self {
        Self {
            outcome: StubOutcome::Forecast(days),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mild, dry days starting on `start`.
    pub fn fair_weather(start: NaiveDate, count: u32) -> Self {
        let days = (0..count)
            .filter_map(|i| start.checked_add_days(Days::new(u64::from(i))))
            .map(|date| DailyForecast {
                date,
                temp_min_c: 10.0,
                temp_max_c: 22.0,
                precipitation_probability_pct: Some(10.0),
                wind_speed_max_kmh: Some(12.0),
            })
            .collect();
        Self::with_days(days)
    }

    /// Fails every lookup with `error`.
    pub fn failing(error: WeatherLookupError) -> Self {
        Self {
            outcome: StubOutcome::Failure(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Recorded `(coordinates, days)` lookups.
    pub fn calls(&self) -> Vec<(Coordinates, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for StubWeatherProvider {
    async fn forecast(
        &self,
        coordinates: Coordinates,
        days: u32,
    ) -> Result<WeatherForecast, WeatherLookupError> {
        self.calls.lock().unwrap().push((coordinates, days));

        match &self.outcome {
            StubOutcome::Failure(err) => Err(err.clone()),
            StubOutcome::Forecast(all) if all.is_empty() => Err(WeatherLookupError::EmptyForecast),
            StubOutcome::Forecast(all) => {
                let days = all.iter().take(days as usize).cloned().collect();
                Ok(WeatherForecast::new(coordinates, days))
            }
        }
    }
}
