//! Tools module - Tools the model may call during a decision flow.
//!
//! Tools let the model fetch context it cannot derive from the farm records,
//! currently the weather forecast at the farm location.
//!
//! # Components
//!
//! - `ToolDefinition` - Name, description and parameter schema of a tool
//! - `ToolCall` / `ToolResponse` - Values exchanged during a tool-use turn
//! - `weather` - The `get_weather_forecast` tool and forecast value objects

mod tool_call;
mod tool_definition;
mod weather;

pub use tool_call::{ToolCall, ToolResponse};
pub use tool_definition::ToolDefinition;
pub use weather::{
    parse_weather_parameters, weather_tool_definition, DailyForecast, WeatherForecast,
    WEATHER_TOOL_NAME,
};
