//! Flow errors and the outcome wrapper.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::{AIError, TokenUsage};

/// Failure of a decision flow invocation.
///
/// Tool failures are not errors: they are reported back to the model and
/// surfaced through `FlowOutcome::weather_degraded`.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Input rejected before any external call.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// A required record stream is empty.
    #[error("insufficient data: no {input}")]
    InsufficientData { input: &'static str },

    /// The model answer could not be accepted.
    #[error("malformed model output: {0}")]
    MalformedModelOutput(String),

    /// The model provider failed.
    #[error("model error: {0}")]
    Model(#[from] AIError),

    /// Writing the flow's audit log failed.
    #[error("persistence error: {0}")]
    Persistence(DomainError),
}

impl FlowError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedModelOutput(message.into())
    }

    /// True when the error happened before the model was called.
    pub fn is_input_error(&self) -> bool {
        matches!(self, FlowError::Validation(_) | FlowError::InsufficientData { .. })
    }
}

/// Output of a successful flow invocation with call metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowOutcome<T> {
    pub output: T,
    /// Number of tool calls the model made.
    pub tool_calls: u32,
    /// True when a weather lookup failed and the model proceeded without it.
    pub weather_degraded: bool,
    /// Token usage summed over every model call.
    pub usage: TokenUsage,
}

impl<T> FlowOutcome<T> {
    /// Replaces the output, keeping the call metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FlowOutcome<U> {
        FlowOutcome {
            output: f(self.output),
            tool_calls: self.tool_calls,
            weather_degraded: self.weather_degraded,
            usage: self.usage,
        }
    }
}
