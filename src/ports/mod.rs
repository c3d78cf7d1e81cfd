//! Ports - Interfaces the decision core depends on.
//!
//! Adapters in `crate::adapters` implement these traits; handlers in
//! `crate::application` receive them as `Arc<dyn Trait>`.

mod ai_provider;
mod log_repository;
mod output_validator;
mod tool_executor;
mod weather_provider;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ContentPart, FinishReason,
    Message, MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use log_repository::{DiagnosisLogRepository, PredictionLogRepository};
pub use output_validator::{FlowOutputValidator, SchemaValidationError};
pub use tool_executor::{ToolExecutionContext, ToolExecutionError, ToolExecutor};
pub use weather_provider::{WeatherLookupError, WeatherProvider};
