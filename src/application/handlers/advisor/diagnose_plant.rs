//! DiagnosePlantHandler - Image-based plant diagnosis.
//!
//! The result is returned as a `ProposedDiagnosis` for the user to review;
//! nothing is persisted until it is confirmed or corrected.

use std::sync::Arc;
use tracing::info;

use super::FlowRunner;
use crate::domain::advisor::{
    FlowContext, FlowError, FlowInputAssembler, FlowKind, FlowOutcome, PlantDiagnosisRequest,
};
use crate::domain::diagnosis::{PlantDiagnosis, ProposedDiagnosis};
use crate::domain::foundation::Timestamp;
use crate::domain::records::BatchRegistry;
use crate::ports::{ContentPart, Message, MessageRole};

pub struct DiagnosePlantHandler {
    runner: Arc<FlowRunner>,
    batches: BatchRegistry,
}

impl DiagnosePlantHandler {
    pub fn new(runner: Arc<FlowRunner>, batches: BatchRegistry) -> Self {
        Self { runner, batches }
    }

    pub async fn handle(
        &self,
        context: &FlowContext,
        request: PlantDiagnosisRequest,
    ) -> Result<FlowOutcome<ProposedDiagnosis>, FlowError> {
        let image = request.validate()?;
        let scope = self.batches.scope_for(request.batch_id.as_deref());

        let assembler = FlowInputAssembler::new(self.runner.settings().window(context));
        let input = Message::new(
            MessageRole::User,
            vec![
                ContentPart::Image {
                    media_type: image.media_type,
                    data: image.data,
                },
                ContentPart::text(assembler.plant_diagnosis(&request.description, &scope)),
            ],
        );

        let outcome: FlowOutcome<PlantDiagnosis> = self
            .runner
            .run(FlowKind::PlantDiagnosis, context, input)
            .await?;

        info!(
            trace_id = %context.trace_id,
            batch_id = %scope,
            primary = %outcome.output.primary_diagnosis,
            hypotheses = outcome.output.hypotheses.len(),
            "Plant diagnosis proposed"
        );

        Ok(outcome.map(|result| ProposedDiagnosis::new(scope, result, Timestamp::now())))
    }
}
