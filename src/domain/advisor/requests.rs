//! Flow requests and the explicit invocation context.
//!
//! Requests carry raw caller input (as received from the client) plus
//! owned snapshots of the records the flow reads. `validate()` is called
//! before any external call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{BatchId, Coordinates, UserId, ValidationError};
use crate::domain::records::{
    AgronomistLogEntry, CollectorPaymentLog, CulturalPracticeLog, HarvestRecord,
    PhenologyLogEntry, SupplyItem, Transaction,
};

/// Who runs a flow, for which trace, and as of which day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowContext {
    pub requested_by: UserId,
    pub trace_id: String,
    /// Reference day for record windows.
    pub as_of: NaiveDate,
}

impl FlowContext {
    /// Creates a context with a fresh trace id.
    pub fn new(requested_by: UserId, as_of: NaiveDate) -> Self {
        Self {
            requested_by,
            trace_id: Uuid::new_v4().to_string(),
            as_of,
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }
}

/// An image decoded from a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub media_type: String,
    /// Base64 payload.
    pub data: String,
}

impl ImageAttachment {
    /// Parses `data:<mimetype>;base64,<encoded_data>`.
    ///
    /// Only `image/*` media types are accepted.
    pub fn from_data_uri(uri: &str) -> Result<Self, ValidationError> {
        const FIELD: &str = "photoDataUri";

        let uri = uri.trim();
        if uri.is_empty() {
            return Err(ValidationError::empty_field(FIELD));
        }
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| ValidationError::invalid_format(FIELD, "must start with 'data:'"))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| ValidationError::invalid_format(FIELD, "missing ',' separator"))?;
        let media_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| ValidationError::invalid_format(FIELD, "must be base64 encoded"))?;

        if !media_type.starts_with("image/") || media_type.len() <= "image/".len() {
            return Err(ValidationError::invalid_format(
                FIELD,
                format!("unsupported media type '{}'", media_type),
            ));
        }
        if data.is_empty() {
            return Err(ValidationError::invalid_format(FIELD, "image data is empty"));
        }
        let is_base64 = data
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='));
        if !is_base64 {
            return Err(ValidationError::invalid_format(FIELD, "image data is not valid base64"));
        }

        Ok(Self {
            media_type: media_type.to_string(),
            data: data.to_string(),
        })
    }
}

fn require_text(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(())
}

/// Input of the yield prediction flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldPredictionRequest {
    pub batch_id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub recent_harvests: Vec<HarvestRecord>,
    #[serde(default)]
    pub agronomist_logs: Vec<AgronomistLogEntry>,
    #[serde(default)]
    pub phenology_logs: Vec<PhenologyLogEntry>,
    #[serde(default)]
    pub environmental_logs: Vec<AgronomistLogEntry>,
}

impl YieldPredictionRequest {
    pub fn validate(&self) -> Result<(BatchId, Coordinates), ValidationError> {
        let batch_id = BatchId::new(self.batch_id.as_str())?;
        let coordinates = Coordinates::new(self.latitude, self.longitude)?;
        Ok((batch_id, coordinates))
    }
}

/// Input of the application recommendation flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecommendationRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub supplies: Vec<SupplyItem>,
    #[serde(default)]
    pub agronomist_logs: Vec<AgronomistLogEntry>,
    #[serde(default)]
    pub phenology_logs: Vec<PhenologyLogEntry>,
}

impl ApplicationRecommendationRequest {
    pub fn validate(&self) -> Result<Coordinates, ValidationError> {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Input of the plant diagnosis flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantDiagnosisRequest {
    pub photo_data_uri: String,
    pub description: String,
    #[serde(default)]
    pub batch_id: Option<String>,
}

impl PlantDiagnosisRequest {
    pub fn validate(&self) -> Result<ImageAttachment, ValidationError> {
        require_text(&self.description, "description")?;
        ImageAttachment::from_data_uri(&self.photo_data_uri)
    }
}

/// Input of the report summarization flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryRequest {
    pub title: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(default)]
    pub harvests: Vec<HarvestRecord>,
    #[serde(default)]
    pub collector_payments: Vec<CollectorPaymentLog>,
    #[serde(default)]
    pub cultural_practice_logs: Vec<CulturalPracticeLog>,
    #[serde(default)]
    pub agronomist_logs: Vec<AgronomistLogEntry>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl ReportSummaryRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, "title")?;
        if self.period_start > self.period_end {
            return Err(ValidationError::invalid_format(
                "periodStart",
                format!(
                    "period start {} is after period end {}",
                    self.period_start, self.period_end
                ),
            ));
        }
        Ok(())
    }

    pub fn in_period(&self, date: NaiveDate) -> bool {
        date >= self.period_start && date <= self.period_end
    }
}
