//! Weather Tool Executor - Serves `get_weather_forecast` to the model.
//!
//! Lookup failures and invalid parameters are answered with an error
//! `ToolResponse` so the model can continue without weather context.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::tools::{
    parse_weather_parameters, weather_tool_definition, ToolCall, ToolDefinition, ToolResponse,
    WEATHER_TOOL_NAME,
};
use crate::ports::{ToolExecutionContext, ToolExecutionError, ToolExecutor, WeatherProvider};

const UNAVAILABLE_SUFFIX: &str = "proceed without weather context";

pub struct WeatherToolExecutor {
    provider: Arc<dyn WeatherProvider + Send + Sync>,
    forecast_days: u32,
}

impl WeatherToolExecutor {
    pub fn new(provider: Arc<dyn WeatherProvider + Send + Sync>, forecast_days: u32) -> Self {
        Self {
            provider,
            forecast_days,
        }
    }

    fn unavailable(reason: impl std::fmt::Display) -> ToolResponse {
        ToolResponse::error(format!(
            "Weather forecast unavailable: {}; {}",
            reason, UNAVAILABLE_SUFFIX
        ))
    }
}

#[async_trait]
impl ToolExecutor for WeatherToolExecutor {
    async fn execute(
        &self,
        call: ToolCall,
        context: ToolExecutionContext,
    ) -> Result<ToolResponse, ToolExecutionError> {
        if call.name() != WEATHER_TOOL_NAME {
            return Err(ToolExecutionError::ToolNotFound(call.name().to_string()));
        }

        let coordinates = match parse_weather_parameters(call.input()) {
            Ok(coordinates) => coordinates,
            Err(err) => {
                warn!(
                    flow = %context.flow,
                    trace_id = %context.trace_id,
                    error = %err,
                    "Rejected weather tool parameters"
                );
                return Ok(Self::unavailable(err));
            }
        };

        match self.provider.forecast(coordinates, self.forecast_days).await {
            Ok(forecast) => {
                debug!(
                    flow = %context.flow,
                    trace_id = %context.trace_id,
                    round = context.round,
                    days = forecast.days.len(),
                    "Weather tool answered"
                );
                Ok(ToolResponse::success(json!({ "forecast": forecast.to_summary() })))
            }
            Err(err) => {
                warn!(
                    flow = %context.flow,
                    trace_id = %context.trace_id,
                    error = %err,
                    "Weather lookup failed"
                );
                Ok(Self::unavailable(err))
            }
        }
    }

    fn definitions(&self) -> Vec<ToolDefinition> {
        vec![weather_tool_definition()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::weather::StubWeatherProvider;
    use crate::domain::advisor::FlowKind;
    use crate::ports::WeatherLookupError;
    use chrono::NaiveDate;

    fn context() -> ToolExecutionContext {
        ToolExecutionContext::new(FlowKind::YieldPrediction, "trace-1", 1)
    }

    fn call(input: serde_json::Value) -> ToolCall {
        ToolCall::new("toolu_1", WEATHER_TOOL_NAME, input)
    }

    #[tokio::test]
    async fn returns_forecast_summary() {
        let stub = StubWeatherProvider::fair_weather(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(), 7);
        let executor = WeatherToolExecutor::new(Arc::new(stub.clone()), 5);

        let response = executor
            .execute(call(json!({"latitude": 19.4, "longitude": -99.1})), context())
            .await
            .unwrap();

        assert!(response.is_success());
        let summary = response.data().unwrap()["forecast"].as_str().unwrap().to_string();
        assert!(summary.contains("(5 days)"));
        assert_eq!(stub.calls()[0].1, 5);
    }

    #[tokio::test]
    async fn lookup_failure_becomes_error_response() {
        let stub = StubWeatherProvider::failing(WeatherLookupError::network("connection refused"));
        let executor = WeatherToolExecutor::new(Arc::new(stub), 5);

        let response = executor
            .execute(call(json!({"latitude": 19.4, "longitude": -99.1})), context())
            .await
            .unwrap();

        assert!(!response.is_success());
        let message = response.error_message().unwrap();
        assert!(message.starts_with("Weather forecast unavailable: network error: connection refused"));
        assert!(message.ends_with("proceed without weather context"));
    }

    #[tokio::test]
    async fn invalid_parameters_skip_the_provider() {
        let stub = StubWeatherProvider::fair_weather(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(), 5);
        let executor = WeatherToolExecutor::new(Arc::new(stub.clone()), 5);

        let response = executor
            .execute(call(json!({"latitude": 120.0, "longitude": 0.0})), context())
            .await
            .unwrap();

        assert!(!response.is_success());
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let stub = StubWeatherProvider::with_days(vec![]);
        let executor = WeatherToolExecutor::new(Arc::new(stub), 5);

        let err = executor
            .execute(ToolCall::new("t", "get_soil_moisture", json!({})), context())
            .await
            .unwrap_err();

        assert!(matches!(err, ToolExecutionError::ToolNotFound(name) if name == "get_soil_moisture"));
        assert!(executor.has_tool(WEATHER_TOOL_NAME));
    }
}
