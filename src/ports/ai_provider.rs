//! AI Provider Port - Interface for language-model integrations.
//!
//! This port abstracts the model runtime behind the decision flows, so flows
//! can request completions without coupling to a specific provider.
//!
//! # Design
//!
//! - Single-shot, non-streaming completions
//! - Messages are made of parts: text, images, tool calls and tool results
//! - Tools and an output JSON Schema travel with the request
//! - Token usage and cost estimation on every response
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoProvider;
//!
//! #[async_trait]
//! impl AIProvider for EchoProvider {
//!     async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
//!         Ok(CompletionResponse::text("{}", "echo"))
//!     }
//!     // ... other methods
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::domain::tools::{ToolCall, ToolDefinition};

/// Port for language-model interactions.
///
/// Implementations connect to an external model service and translate
/// between the provider-specific API and these types.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Estimate token count for text (for cost estimation before API call).
    fn estimate_tokens(&self, text: &str) -> u32;

    /// Get provider information (name, model, capabilities).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation so far (context message, tool calls and tool results).
    pub messages: Vec<Message>,
    /// Instruction template guiding the model.
    pub system_prompt: Option<String>,
    /// Tools the model may call.
    pub tools: Vec<ToolDefinition>,
    /// JSON Schema the final answer must conform to.
    pub output_schema: Option<serde_json::Value>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness (0.0 = deterministic).
    pub temperature: Option<f32>,
    /// Request metadata for tracing.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    /// Creates a new completion request with required metadata.
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            tools: Vec::new(),
            output_schema: None,
            max_tokens: None,
            temperature: None,
            metadata,
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_output_schema(mut self, schema: serde_json::Value) -> Self {
        self.output_schema = Some(schema);
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// True when the request offers a tool with the given name.
    pub fn offers_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }
}

/// A single part of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: String,
    },
    /// Base64-encoded image.
    Image {
        media_type: String,
        data: String,
    },
    ToolUse {
        call: ToolCall,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        is_error: bool,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub parts: Vec<ContentPart>,
}

impl Message {
    pub fn new(role: MessageRole, parts: Vec<ContentPart>) -> Self {
        Self { role, parts }
    }

    /// Creates a plain-text user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, vec![ContentPart::text(content)])
    }

    /// Creates a plain-text assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, vec![ContentPart::text(content)])
    }

    /// Concatenated text parts of the message.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Request metadata for tracing.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// User on whose behalf the flow runs.
    pub user_id: UserId,
    /// Flow name (e.g. "yield_prediction").
    pub flow: String,
    /// Trace ID for distributed tracing.
    pub trace_id: String,
}

impl RequestMetadata {
    pub fn new(user_id: UserId, flow: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self {
            user_id,
            flow: flow.into(),
            trace_id: trace_id.into(),
        }
    }
}

/// Response from a completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text (may be empty when the model only calls tools).
    pub content: String,
    /// Tools the model asked to call, in order.
    pub tool_calls: Vec<ToolCall>,
    /// Token usage and cost.
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    /// Why the model stopped generating.
    pub finish_reason: FinishReason,
}

impl CompletionResponse {
    /// Creates a text-only response that stopped naturally.
    pub fn text(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
            usage: TokenUsage::zero(),
            model: model.into(),
            finish_reason: FinishReason::Stop,
        }
    }

    /// True when the model is waiting for tool results.
    pub fn requests_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
    /// Estimated cost in cents.
    pub estimated_cost_cents: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32, cost_cents: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
            estimated_cost_cents: cost_cents,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Adds another call's usage to this one.
    pub fn accumulate(&mut self, other: &TokenUsage) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(other.prompt_tokens);
        self.completion_tokens = self.completion_tokens.saturating_add(other.completion_tokens);
        self.total_tokens = self.total_tokens.saturating_add(other.total_tokens);
        self.estimated_cost_cents = self
            .estimated_cost_cents
            .saturating_add(other.estimated_cost_cents);
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// Stopped to wait for tool results.
    ToolUse,
    /// Content was filtered for safety.
    ContentFilter,
    /// An error occurred.
    Error,
}

/// Provider information and capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "anthropic").
    pub name: String,
    /// Model identifier.
    pub model: String,
    /// Maximum context window size in tokens.
    pub max_context_tokens: u32,
    /// Whether tool calling is supported.
    pub supports_tools: bool,
    /// Whether image inputs are supported.
    pub supports_images: bool,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>, max_context_tokens: u32) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            max_context_tokens,
            supports_tools: false,
            supports_images: false,
        }
    }

    pub fn with_tools(mut self, supports: bool) -> Self {
        self.supports_tools = supports;
        self
    }

    pub fn with_images(mut self, supports: bool) -> Self {
        self.supports_images = supports;
        self
    }
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Prompt exceeds model limit.
    #[error("context too long: {tokens} tokens exceeds {max} limit")]
    ContextTooLong { tokens: u32, max: u32 },

    /// Content was filtered for safety.
    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn context_too_long(tokens: u32, max: u32) -> Self {
        Self::ContextTooLong { tokens, max }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

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
    use crate::domain::tools::weather_tool_definition;

    fn test_metadata() -> RequestMetadata {
        RequestMetadata::new(UserId::new("grower-1").unwrap(), "yield_prediction", "trace-123")
    }

    #[test]
    fn completion_request_builder_works() {
        let request = CompletionRequest::new(test_metadata())
            .with_message(Message::user("Harvest context"))
            .with_system_prompt("You are an agronomist")
            .with_tools(vec![weather_tool_definition()])
            .with_output_schema(serde_json::json!({"type": "object"}))
            .with_max_tokens(100)
            .with_temperature(0.2);

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.messages[0].text(), "Harvest context");
        assert_eq!(request.system_prompt.as_deref(), Some("You are an agronomist"));
        assert!(request.offers_tool("get_weather_forecast"));
        assert!(!request.offers_tool("other"));
        assert!(request.output_schema.is_some());
        assert_eq!(request.max_tokens, Some(100));
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.metadata.flow, "yield_prediction");
    }

    #[test]
    fn message_text_skips_non_text_parts() {
        let message = Message::new(
            MessageRole::User,
            vec![
                ContentPart::Image {
                    media_type: "image/jpeg".to_string(),
                    data: "AAAA".to_string(),
                },
                ContentPart::text("Leaves with brown spots"),
            ],
        );
        assert_eq!(message.text(), "Leaves with brown spots");
    }

    #[test]
    fn text_response_requests_no_tools() {
        let response = CompletionResponse::text("{}", "mock");
        assert!(!response.requests_tools());
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn token_usage_calculates_total() {
        let usage = TokenUsage::new(100, 50, 15);
        assert_eq!(usage.total_tokens, 150);
        assert_eq!(usage.estimated_cost_cents, 15);
    }

    #[test]
    fn token_usage_accumulates() {
        let mut usage = TokenUsage::zero();
        usage.accumulate(&TokenUsage::new(100, 50, 2));
        usage.accumulate(&TokenUsage::new(30, 20, 1));

        assert_eq!(usage.prompt_tokens, 130);
        assert_eq!(usage.completion_tokens, 70);
        assert_eq!(usage.total_tokens, 200);
        assert_eq!(usage.estimated_cost_cents, 3);
    }

    #[test]
    fn provider_info_builder_works() {
        let info = ProviderInfo::new("anthropic", "claude-sonnet-4-20250514", 200_000)
            .with_tools(true)
            .with_images(true);

        assert_eq!(info.name, "anthropic");
        assert_eq!(info.max_context_tokens, 200_000);
        assert!(info.supports_tools);
        assert!(info.supports_images);
    }

    #[test]
    fn content_part_serializes_tagged() {
        let json = serde_json::to_value(ContentPart::text("hi")).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "hi");
    }

    #[test]
    fn finish_reason_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&FinishReason::ToolUse).unwrap(), "\"tool_use\"");
        assert_eq!(
            serde_json::to_string(&FinishReason::ContentFilter).unwrap(),
            "\"content_filter\""
        );
    }

    #[test]
    fn ai_error_displays_correctly() {
        assert_eq!(AIError::rate_limited(30).to_string(), "rate limited: retry after 30s");
        assert_eq!(
            AIError::context_too_long(200000, 128000).to_string(),
            "context too long: 200000 tokens exceeds 128000 limit"
        );
        assert_eq!(AIError::AuthenticationFailed.to_string(), "authentication failed");
    }
}
