//! FlowRunner - Shared model invocation of every decision flow.
//!
//! One invocation is:
//!
//! 1. Send the system prompt, the context message, the offered tools and the
//!    output schema to the model
//! 2. While the model asks for tools, run every call of the turn
//!    concurrently, send the results back and ask again, up to
//!    `max_tool_rounds` rounds
//! 3. Extract the JSON answer, validate it against the flow schema and
//!    deserialize it into the flow output
//!
//! A failing tool never aborts the flow: the model receives an error result
//! and the outcome is flagged as degraded when the tool was the weather lookup.

use futures::future::join_all;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::advisor::{
    extract_json, system_prompt, AssemblyWindow, FlowContext, FlowError, FlowKind, FlowOutcome,
};
use crate::domain::tools::{ToolCall, ToolResponse, WEATHER_TOOL_NAME};
use crate::ports::{
    AIProvider, CompletionRequest, ContentPart, FlowOutputValidator, Message, MessageRole,
    RequestMetadata, TokenUsage, ToolExecutionContext, ToolExecutor,
};

/// Tunables shared by every flow handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSettings {
    /// Tool-use rounds allowed per invocation (at least 1).
    pub max_tool_rounds: u32,
    pub window_days: u32,
    pub max_entries: usize,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            max_tool_rounds: 3,
            window_days: AssemblyWindow::DEFAULT_DAYS,
            max_entries: AssemblyWindow::DEFAULT_MAX_ENTRIES,
            max_tokens: 2048,
            temperature: 0.2,
        }
    }
}

impl FlowSettings {
    /// Record window ending on the context's reference day.
    pub fn window(&self, context: &FlowContext) -> AssemblyWindow {
        AssemblyWindow::new(context.as_of, self.window_days, self.max_entries)
    }
}

pub struct FlowRunner {
    ai_provider: Arc<dyn AIProvider + Send + Sync>,
    tools: Option<Arc<dyn ToolExecutor + Send + Sync>>,
    validator: Arc<dyn FlowOutputValidator>,
    settings: FlowSettings,
}

impl FlowRunner {
    pub fn new(
        ai_provider: Arc<dyn AIProvider + Send + Sync>,
        validator: Arc<dyn FlowOutputValidator>,
        settings: FlowSettings,
    ) -> Self {
        Self {
            ai_provider,
            tools: None,
            validator,
            settings,
        }
    }

    /// Offers the executor's tools to flows that use them.
    pub fn with_tools(mut self, tools: Arc<dyn ToolExecutor + Send + Sync>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// Runs `flow` with `input` as the first user message.
    pub async fn run<T: DeserializeOwned>(
        &self,
        flow: FlowKind,
        context: &FlowContext,
        input: Message,
    ) -> Result<FlowOutcome<T>, FlowError> {
        let offered = self.offered_tools(flow);
        let mut messages = vec![input];
        let mut usage = TokenUsage::zero();
        let mut tool_calls = 0u32;
        let mut weather_degraded = false;
        let mut round = 0u32;

        loop {
            let response = self
                .ai_provider
                .complete(self.build_request(flow, context, &offered, messages.clone()))
                .await?;
            usage.accumulate(&response.usage);

            if !response.requests_tools() {
                let output = self.accept(flow, &response.content)?;
                info!(
                    flow = %flow,
                    trace_id = %context.trace_id,
                    tool_calls,
                    degraded = weather_degraded,
                    total_tokens = usage.total_tokens,
                    "Flow completed"
                );
                return Ok(FlowOutcome {
                    output,
                    tool_calls,
                    weather_degraded,
                    usage,
                });
            }

            round += 1;
            if round > self.settings.max_tool_rounds {
                return Err(FlowError::malformed(format!(
                    "model still requested tools after {} rounds",
                    self.settings.max_tool_rounds
                )));
            }

            let calls = response.tool_calls;
            tool_calls = tool_calls.saturating_add(calls.len() as u32);
            debug!(
                flow = %flow,
                trace_id = %context.trace_id,
                round,
                calls = calls.len(),
                "Executing tool calls"
            );

            let tool_context = ToolExecutionContext::new(flow, context.trace_id.clone(), round);
            let responses = join_all(
                calls
                    .iter()
                    .cloned()
                    .map(|call| self.execute(call, tool_context.clone(), offered.as_ref())),
            )
            .await;

            weather_degraded |= calls
                .iter()
                .zip(&responses)
                .any(|(call, r)| call.name() == WEATHER_TOOL_NAME && !r.is_success());

            let mut assistant_parts = Vec::with_capacity(calls.len() + 1);
            if !response.content.trim().is_empty() {
                assistant_parts.push(ContentPart::text(response.content));
            }
            let result_parts = calls
                .iter()
                .zip(&responses)
                .map(|(call, r)| ContentPart::ToolResult {
                    tool_use_id: call.id().to_string(),
                    content: r.to_content(),
                    is_error: !r.is_success(),
                })
                .collect();
            assistant_parts.extend(calls.into_iter().map(|call| ContentPart::ToolUse { call }));

            messages.push(Message::new(MessageRole::Assistant, assistant_parts));
            messages.push(Message::new(MessageRole::User, result_parts));
        }
    }

    fn offered_tools(&self, flow: FlowKind) -> Option<Arc<dyn ToolExecutor + Send + Sync>> {
        if flow.uses_weather_tool() {
            self.tools.clone()
        } else {
            None
        }
    }

    fn build_request(
        &self,
        flow: FlowKind,
        context: &FlowContext,
        offered: &Option<Arc<dyn ToolExecutor + Send + Sync>>,
        messages: Vec<Message>,
    ) -> CompletionRequest {
        let metadata = RequestMetadata::new(
            context.requested_by.clone(),
            flow.as_str(),
            context.trace_id.clone(),
        );
        let mut request = CompletionRequest::new(metadata)
            .with_system_prompt(system_prompt(flow))
            .with_output_schema(self.validator.schema_for(flow).clone())
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature);
        if let Some(tools) = offered {
            request = request.with_tools(tools.definitions());
        }
        for message in messages {
            request = request.with_message(message);
        }
        request
    }

    async fn execute(
        &self,
        call: ToolCall,
        context: ToolExecutionContext,
        offered: Option<&Arc<dyn ToolExecutor + Send + Sync>>,
    ) -> ToolResponse {
        let Some(executor) = offered.filter(|e| e.has_tool(call.name())) else {
            warn!(tool = call.name(), flow = %context.flow, "Model called a tool that was not offered");
            return ToolResponse::error(format!("Unknown tool: {}", call.name()));
        };

        let name = call.name().to_string();
        match executor.execute(call, context).await {
            Ok(response) => response,
            Err(err) => {
                warn!(tool = %name, error = %err, "Tool execution failed");
                ToolResponse::error(err.to_string())
            }
        }
    }

    fn accept<T: DeserializeOwned>(&self, flow: FlowKind, content: &str) -> Result<T, FlowError> {
        let value = extract_json(content)?;
        self.validator
            .validate(flow, &value)
            .map_err(|e| FlowError::malformed(e.summary()))?;
        serde_json::from_value(value).map_err(|e| FlowError::malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::tools::WeatherToolExecutor;
    use crate::adapters::validation::JsonSchemaValidator;
    use crate::adapters::weather::StubWeatherProvider;
    use crate::domain::advisor::{Confidence, ReportSummary, YieldPrediction};
    use crate::domain::foundation::UserId;
    use crate::ports::WeatherLookupError;
    use chrono::NaiveDate;
    use serde_json::json;

    const PREDICTION: &str = r#"{"prediction": "Expect 8% more fruit", "confidence": "Medium"}"#;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn context() -> FlowContext {
        FlowContext::new(UserId::new("grower-1").unwrap(), day()).with_trace_id("trace-1")
    }

    fn runner(mock: &MockAIProvider, weather: StubWeatherProvider) -> FlowRunner {
        let tools = WeatherToolExecutor::new(Arc::new(weather), 5);
        FlowRunner::new(
            Arc::new(mock.clone()),
            Arc::new(JsonSchemaValidator::new()),
            FlowSettings::default(),
        )
        .with_tools(Arc::new(tools))
    }

    fn weather_call() -> serde_json::Value {
        json!({"latitude": 19.4, "longitude": -99.1})
    }

    #[tokio::test]
    async fn answers_without_tools() {
        let mock = MockAIProvider::new().with_response(PREDICTION);
        let runner = runner(&mock, StubWeatherProvider::fair_weather(day(), 5));

        let outcome: FlowOutcome<YieldPrediction> = runner
            .run(FlowKind::YieldPrediction, &context(), Message::user("ctx"))
            .await
            .unwrap();

        assert_eq!(outcome.output.confidence, Confidence::Medium);
        assert_eq!(outcome.tool_calls, 0);
        assert!(!outcome.weather_degraded);

        let request = mock.last_call().unwrap();
        assert!(request.offers_tool(WEATHER_TOOL_NAME));
        assert!(request.output_schema.is_some());
        assert_eq!(request.metadata.trace_id, "trace-1");
    }

    #[tokio::test]
    async fn feeds_tool_results_back() {
        let mock = MockAIProvider::new()
            .with_tool_call(WEATHER_TOOL_NAME, weather_call())
            .with_response(PREDICTION);
        let runner = runner(&mock, StubWeatherProvider::fair_weather(day(), 5));

        let outcome: FlowOutcome<YieldPrediction> = runner
            .run(FlowKind::YieldPrediction, &context(), Message::user("ctx"))
            .await
            .unwrap();

        assert_eq!(outcome.tool_calls, 1);
        assert!(!outcome.weather_degraded);
        assert_eq!(mock.call_count(), 2);
        assert_eq!(outcome.usage.total_tokens, 15 + 30);

        let second = &mock.get_calls()[1];
        assert_eq!(second.messages.len(), 3);
        assert!(matches!(
            &second.messages[1].parts[0],
            ContentPart::ToolUse { call } if call.name() == WEATHER_TOOL_NAME
        ));
        match &second.messages[2].parts[0] {
            ContentPart::ToolResult { content, is_error, .. } => {
                assert!(!is_error);
                assert!(content.contains("Forecast for"));
            }
            other => panic!("expected tool result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn weather_failure_degrades_instead_of_failing() {
        let mock = MockAIProvider::new()
            .with_tool_call(WEATHER_TOOL_NAME, weather_call())
            .with_response(PREDICTION);
        let runner = runner(
            &mock,
            StubWeatherProvider::failing(WeatherLookupError::Timeout { timeout_secs: 15 }),
        );

        let outcome: FlowOutcome<YieldPrediction> = runner
            .run(FlowKind::YieldPrediction, &context(), Message::user("ctx"))
            .await
            .unwrap();

        assert!(outcome.weather_degraded);
        match &mock.get_calls()[1].messages[2].parts[0] {
            ContentPart::ToolResult { content, is_error, .. } => {
                assert!(is_error);
                assert!(content.contains("Weather forecast unavailable"));
            }
            other => panic!("expected tool result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn caps_tool_rounds() {
        let mut mock = MockAIProvider::new();
        for _ in 0..4 {
            mock = mock.with_tool_call(WEATHER_TOOL_NAME, weather_call());
        }
        let runner = runner(&mock, StubWeatherProvider::fair_weather(day(), 5));

        let err = runner
            .run::<YieldPrediction>(FlowKind::YieldPrediction, &context(), Message::user("ctx"))
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::MalformedModelOutput(_)));
        assert_eq!(mock.call_count(), 4);
    }

    #[tokio::test]
    async fn flows_without_tools_do_not_offer_them() {
        let mock = MockAIProvider::new()
            .with_tool_call(WEATHER_TOOL_NAME, weather_call())
            .with_response(r#"{"summary": "Fine", "highlights": ["L014 steady"]}"#);
        let weather = StubWeatherProvider::fair_weather(day(), 5);
        let runner = runner(&mock, weather.clone());

        let outcome: FlowOutcome<ReportSummary> = runner
            .run(FlowKind::ReportSummary, &context(), Message::user("ctx"))
            .await
            .unwrap();

        assert!(mock.get_calls()[0].tools.is_empty());
        assert_eq!(weather.call_count(), 0);
        assert!(outcome.weather_degraded);
    }

    #[tokio::test]
    async fn rejects_answers_outside_schema() {
        let mock = MockAIProvider::new()
            .with_response(r#"{"prediction": "Up", "confidence": "Certain"}"#);
        let runner = runner(&mock, StubWeatherProvider::fair_weather(day(), 5));

        let err = runner
            .run::<YieldPrediction>(FlowKind::YieldPrediction, &context(), Message::user("ctx"))
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::MalformedModelOutput(_)));
    }

    #[tokio::test]
    async fn propagates_provider_errors() {
        let mock = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let runner = runner(&mock, StubWeatherProvider::fair_weather(day(), 5));

        let err = runner
            .run::<YieldPrediction>(FlowKind::YieldPrediction, &context(), Message::user("ctx"))
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::Model(_)));
    }
}
