//! Prediction log - append-only record of a yield prediction.

use serde::{Deserialize, Serialize};

use super::{Confidence, YieldPrediction};
use crate::domain::foundation::{BatchId, PredictionLogId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionLog {
    pub id: PredictionLogId,
    pub date: Timestamp,
    pub batch_id: BatchId,
    pub prediction: String,
    pub confidence: Confidence,
}

impl PredictionLog {
    pub fn from_prediction(batch_id: BatchId, prediction: &YieldPrediction, date: Timestamp) -> Self {
        Self {
            id: PredictionLogId::new(),
            date,
            batch_id,
            prediction: prediction.prediction.clone(),
            confidence: prediction.confidence,
        }
    }
}
