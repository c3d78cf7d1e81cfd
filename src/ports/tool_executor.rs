//! Tool Executor Port - Interface for executing tools the model calls.
//!
//! Tools give the model access to context outside the farm records. The
//! executor validates the call, runs it, and describes the outcome as a
//! `ToolResponse` the model can read.
//!
//! # Design
//!
//! - A failing tool yields an error *response*, not an aborted flow
//! - `Err` is reserved for calls the executor cannot handle at all
//! - Executors advertise their tool definitions for the request

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::advisor::FlowKind;
use crate::domain::foundation::{DomainError, ValidationError};
use crate::domain::tools::{ToolCall, ToolDefinition, ToolResponse};

/// Port for executing tools invoked by the model.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool call.
    ///
    /// # Returns
    ///
    /// * `Ok(ToolResponse)` - Tool ran (check `is_success()` for outcome)
    /// * `Err(ToolExecutionError)` - The executor could not handle the call
    async fn execute(
        &self,
        call: ToolCall,
        context: ToolExecutionContext,
    ) -> Result<ToolResponse, ToolExecutionError>;

    /// Definitions of the tools this executor serves.
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Check if a tool exists.
    fn has_tool(&self, name: &str) -> bool {
        self.definitions().iter().any(|d| d.name() == name)
    }
}

/// Context for tool execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionContext {
    /// Flow that triggered the call
    pub flow: FlowKind,

    /// Trace ID of the flow invocation
    pub trace_id: String,

    /// Tool-use round within the invocation (1-based)
    pub round: u32,
}

impl ToolExecutionContext {
    pub fn new(flow: FlowKind, trace_id: impl Into<String>, round: u32) -> Self {
        Self {
            flow,
            trace_id: trace_id.into(),
            round,
        }
    }
}

/// Errors that can occur during tool execution.
#[derive(Debug, Clone, Error)]
pub enum ToolExecutionError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Validation error: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Domain error: {0}")]
    DomainError(#[from] DomainError),

    #[error("System error: {0}")]
    SystemError(String),
}

impl ToolExecutionError {
    pub fn system(message: impl Into<String>) -> Self {
        Self::SystemError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_context_new_sets_fields() {
        let ctx = ToolExecutionContext::new(FlowKind::YieldPrediction, "trace-1", 2);

        assert_eq!(ctx.flow, FlowKind::YieldPrediction);
        assert_eq!(ctx.trace_id, "trace-1");
        assert_eq!(ctx.round, 2);
    }

    #[test]
    fn tool_execution_error_from_validation() {
        let exec_err: ToolExecutionError = ValidationError::empty_field("latitude").into();
        assert!(matches!(exec_err, ToolExecutionError::ValidationFailed(_)));
    }

    #[test]
    fn tool_execution_error_system() {
        let err = ToolExecutionError::system("Executor shut down");
        assert!(matches!(err, ToolExecutionError::SystemError(_)));
        assert!(err.to_string().contains("Executor shut down"));
    }

    #[test]
    fn tool_executor_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ToolExecutor>();
    }
}
