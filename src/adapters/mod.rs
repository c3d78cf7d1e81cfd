//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Model providers (Anthropic, mock)
//! - `weather` - Forecast providers (Open-Meteo, stub)
//! - `tools` - Tool executors offered to the model
//! - `validation` - Flow output schema validation
//! - `storage` - Diagnosis and prediction log repositories

pub mod ai;
pub mod storage;
pub mod tools;
pub mod validation;
pub mod weather;

pub use ai::{AnthropicConfig, AnthropicProvider, MockAIProvider};
pub use storage::{InMemoryDiagnosisLogRepository, InMemoryPredictionLogRepository};
pub use tools::WeatherToolExecutor;
pub use validation::JsonSchemaValidator;
pub use weather::{OpenMeteoConfig, OpenMeteoProvider, StubWeatherProvider};
