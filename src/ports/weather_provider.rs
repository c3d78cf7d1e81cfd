//! Weather Provider Port - Interface for fetching short-range forecasts.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::Coordinates;
use crate::domain::tools::WeatherForecast;

/// Port for weather forecast lookups.
///
/// Implementations return one `DailyForecast` per day, starting today,
/// for up to `days` days.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn forecast(
        &self,
        coordinates: Coordinates,
        days: u32,
    ) -> Result<WeatherForecast, WeatherLookupError>;
}

/// Weather lookup failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherLookupError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("could not parse forecast: {0}")]
    Parse(String),

    #[error("forecast contained no days")]
    EmptyForecast,

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl WeatherLookupError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_correctly() {
        let err = WeatherLookupError::Provider {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "provider returned 503: maintenance");
        assert_eq!(
            WeatherLookupError::Timeout { timeout_secs: 15 }.to_string(),
            "request timed out after 15s"
        );
        assert_eq!(
            WeatherLookupError::EmptyForecast.to_string(),
            "forecast contained no days"
        );
    }

    #[test]
    fn weather_provider_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherProvider>();
    }
}
