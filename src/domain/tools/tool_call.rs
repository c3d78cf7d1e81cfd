//! Tool call and response types.
//!
//! These are the request/response value objects exchanged with the model
//! during a tool-use turn.

use serde::{Deserialize, Serialize};

/// A request from the model to invoke a tool.
///
/// The `id` is the provider's tool-use identifier; the matching result must
/// carry it back so the model can pair them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    id: String,
    name: String,
    input: serde_json::Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(&self) -> &serde_json::Value {
        &self.input
    }
}

/// Response from executing a tool.
///
/// Failures are still responses: the model receives the error text and
/// decides how to proceed.
///
/// # Examples
///
/// ```ignore
/// use berry_sherpa::domain::tools::ToolResponse;
///
/// let ok = ToolResponse::success(serde_json::json!({ "forecast": "..." }));
/// let failed = ToolResponse::error("Weather forecast unavailable");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    success: bool,
    data: Option<serde_json::Value>,
    error: Option<String>,
}

impl ToolResponse {
    /// Creates a successful response with data.
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Text sent back to the model as the tool result content.
    pub fn to_content(&self) -> String {
        match (&self.data, &self.error) {
            (_, Some(message)) => message.clone(),
            (Some(data), None) => data.to_string(),
            (None, None) => String::new(),
        }
    }
}
