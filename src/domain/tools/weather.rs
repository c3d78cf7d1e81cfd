//! Weather forecast tool - definition, parameters and forecast value objects.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ToolDefinition;
use crate::domain::foundation::{Coordinates, ValidationError};

/// Name under which the weather tool is offered to the model.
pub const WEATHER_TOOL_NAME: &str = "get_weather_forecast";

/// Builds the `get_weather_forecast` tool definition.
pub fn weather_tool_definition() -> ToolDefinition {
    ToolDefinition::new(
        WEATHER_TOOL_NAME,
        "Get the daily weather forecast for the coming days at the farm location. \
         Returns one line per day with temperature range, precipitation probability \
         and maximum wind speed.",
        serde_json::json!({
            "type": "object",
            "required": ["latitude", "longitude"],
            "properties": {
                "latitude": {
                    "type": "number",
                    "minimum": -90,
                    "maximum": 90,
                    "description": "Latitude of the farm in decimal degrees"
                },
                "longitude": {
                    "type": "number",
                    "minimum": -180,
                    "maximum": 180,
                    "description": "Longitude of the farm in decimal degrees"
                }
            }
        }),
    )
}

/// Parses tool-call input into validated coordinates.
pub fn parse_weather_parameters(input: &serde_json::Value) -> Result<Coordinates, ValidationError> {
    let number = |field: &str| -> Result<f64, ValidationError> {
        match input.get(field) {
            None | Some(serde_json::Value::Null) => Err(ValidationError::empty_field(field)),
            Some(value) => value
                .as_f64()
                .ok_or_else(|| ValidationError::invalid_format(field, "must be a number")),
        }
    };

    Coordinates::new(number("latitude")?, number("longitude")?)
}

/// Forecast for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub precipitation_probability_pct: Option<f64>,
    pub wind_speed_max_kmh: Option<f64>,
}

/// Multi-day forecast for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub coordinates: Coordinates,
    pub days: Vec<DailyForecast>,
}

impl WeatherForecast {
    pub fn new(coordinates: Coordinates, days: Vec<DailyForecast>) -> Self {
        Self { coordinates, days }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Renders the forecast as free text for inclusion in a prompt.
    ///
    /// ```text
    /// Forecast for 19.4326, -99.1332 (5 days):
    /// 2024-05-10: 11.0-24.5 °C, precipitation 40%, wind up to 18 km/h
    /// ```
    pub fn to_summary(&self) -> String {
        let mut out = format!(
            "Forecast for {} ({} days):",
            self.coordinates,
            self.days.len()
        );
        for day in &self.days {
            let _ = write!(
                out,
                "\n{}: {:.1}-{:.1} °C",
                day.date, day.temp_min_c, day.temp_max_c
            );
            match day.precipitation_probability_pct {
                Some(p) => {
                    let _ = write!(out, ", precipitation {:.0}%", p);
                }
                None => out.push_str(", precipitation n/a"),
            }
            match day.wind_speed_max_kmh {
                Some(w) => {
                    let _ = write!(out, ", wind up to {:.0} km/h", w);
                }
                None => out.push_str(", wind n/a"),
            }
        }
        out
    }
}
