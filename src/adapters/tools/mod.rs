//! Tool Executor Adapters.

mod weather_tool;

pub use weather_tool::WeatherToolExecutor;
