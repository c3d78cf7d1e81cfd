//! RecommendApplicationsHandler - Fertilizer and phytosanitary recommendations.

use std::sync::Arc;
use tracing::info;

use super::FlowRunner;
use crate::domain::advisor::{
    ApplicationRecommendationRequest, FlowContext, FlowError, FlowInputAssembler, FlowKind,
    FlowOutcome, RecommendationSet,
};
use crate::ports::Message;

pub struct RecommendApplicationsHandler {
    runner: Arc<FlowRunner>,
}

impl RecommendApplicationsHandler {
    pub fn new(runner: Arc<FlowRunner>) -> Self {
        Self { runner }
    }

    /// Empty supplies and logs are a valid context; the answer always holds
    /// at least one recommendation.
    pub async fn handle(
        &self,
        context: &FlowContext,
        request: ApplicationRecommendationRequest,
    ) -> Result<FlowOutcome<RecommendationSet>, FlowError> {
        let coordinates = request.validate()?;

        let assembler = FlowInputAssembler::new(self.runner.settings().window(context));
        let input = assembler.application_recommendation(&coordinates, &request);

        let outcome: FlowOutcome<RecommendationSet> = self
            .runner
            .run(FlowKind::ApplicationRecommendation, context, Message::user(input))
            .await?;

        info!(
            trace_id = %context.trace_id,
            recommendations = outcome.output.recommendations.len(),
            degraded = outcome.weather_degraded,
            "Application recommendations produced"
        );
        Ok(outcome)
    }
}
