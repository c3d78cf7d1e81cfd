//! PredictYieldHandler - Yield outlook for a batch, logged on success.

use std::sync::Arc;
use tracing::info;

use super::FlowRunner;
use crate::domain::advisor::{
    FlowContext, FlowError, FlowInputAssembler, FlowKind, FlowOutcome, PredictionLog,
    YieldPrediction, YieldPredictionRequest,
};
use crate::domain::foundation::Timestamp;
use crate::ports::{Message, PredictionLogRepository};

/// Result of a yield prediction.
#[derive(Debug, Clone)]
pub struct PredictYieldResult {
    pub outcome: FlowOutcome<YieldPrediction>,
    /// Audit entry written for this prediction.
    pub log: PredictionLog,
}

pub struct PredictYieldHandler {
    runner: Arc<FlowRunner>,
    predictions: Arc<dyn PredictionLogRepository>,
}

impl PredictYieldHandler {
    pub fn new(runner: Arc<FlowRunner>, predictions: Arc<dyn PredictionLogRepository>) -> Self {
        Self {
            runner,
            predictions,
        }
    }

    pub async fn handle(
        &self,
        context: &FlowContext,
        request: YieldPredictionRequest,
    ) -> Result<PredictYieldResult, FlowError> {
        // 1. Validate before any external call
        let (batch_id, coordinates) = request.validate()?;

        // 2. Assemble the windowed context
        let assembler = FlowInputAssembler::new(self.runner.settings().window(context));
        let input = assembler.yield_prediction(&batch_id, &coordinates, &request)?;

        // 3. Ask the model
        let outcome: FlowOutcome<YieldPrediction> = self
            .runner
            .run(FlowKind::YieldPrediction, context, Message::user(input))
            .await?;

        // 4. Append the prediction log
        let log = PredictionLog::from_prediction(batch_id, &outcome.output, Timestamp::now());
        self.predictions
            .create(&log)
            .await
            .map_err(FlowError::Persistence)?;

        info!(
            trace_id = %context.trace_id,
            batch_id = %log.batch_id,
            confidence = ?log.confidence,
            degraded = outcome.weather_degraded,
            "Yield prediction recorded"
        );

        Ok(PredictYieldResult { outcome, log })
    }
}
