//! Agronomist field log entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{serde_helpers, BatchScoped, Dated};
use crate::domain::foundation::{BatchId, RecordId};

/// Kind of field activity recorded by the agronomist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgronomistLogType {
    Fertilization,
    Fumigation,
    Control,
    Sanitation,
    CulturalPractice,
    Irrigation,
    EnvironmentalConditions,
}

impl AgronomistLogType {
    /// Returns the display label for this log type.
    pub fn label(&self) -> &'static str {
        match self {
            AgronomistLogType::Fertilization => "Fertilization",
            AgronomistLogType::Fumigation => "Fumigation",
            AgronomistLogType::Control => "Control",
            AgronomistLogType::Sanitation => "Sanitation",
            AgronomistLogType::CulturalPractice => "Cultural practice",
            AgronomistLogType::Irrigation => "Irrigation",
            AgronomistLogType::EnvironmentalConditions => "Environmental conditions",
        }
    }
}

/// A single agronomist log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgronomistLogEntry {
    pub id: RecordId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub log_type: AgronomistLogType,
    #[serde(default, deserialize_with = "serde_helpers::optional_batch_id")]
    pub batch_id: Option<BatchId>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub quantity_used: Option<f64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl AgronomistLogEntry {
    /// Creates an entry with no product, batch or notes.
    pub fn new(id: RecordId, date: NaiveDate, log_type: AgronomistLogType) -> Self {
        Self {
            id,
            date,
            log_type,
            batch_id: None,
            product: None,
            quantity_used: None,
            notes: String::new(),
            images: Vec::new(),
        }
    }

    pub fn with_batch(mut self, batch_id: BatchId) -> Self {
        self.batch_id = Some(batch_id);
        self
    }

    /// Records the product applied and the quantity used.
    pub fn with_application(mut self, product: impl Into<String>, quantity_used: f64) -> Self {
        self.product = Some(product.into());
        self.quantity_used = Some(quantity_used);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Returns the applied product and quantity when the entry names both.
    pub fn application(&self) -> Option<(&str, f64)> {
        let product = self.product.as_deref().map(str::trim).filter(|p| !p.is_empty())?;
        let quantity = self.quantity_used?;
        Some((product, quantity))
    }

    /// True when the entry names a product and a quantity.
    pub fn is_product_application(&self) -> bool {
        self.application().is_some()
    }
}

impl Dated for AgronomistLogEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl BatchScoped for AgronomistLogEntry {
    fn batch_id(&self) -> Option<&BatchId> {
        self.batch_id.as_ref()
    }
}
