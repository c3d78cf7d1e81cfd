//! Harvest records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BatchScoped, Dated};
use crate::domain::foundation::{BatchId, RecordId};

/// Kilograms collected from a batch on a given day by one collector.
///
/// Harvests are immutable; collector payment logs point at them by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestRecord {
    pub id: RecordId,
    pub date: NaiveDate,
    pub batch_number: BatchId,
    #[serde(default)]
    pub collector_ref: String,
    pub kilograms: f64,
}

impl HarvestRecord {
    pub fn new(
        id: RecordId,
        date: NaiveDate,
        batch_number: BatchId,
        collector_ref: impl Into<String>,
        kilograms: f64,
    ) -> Self {
        Self {
            id,
            date,
            batch_number,
            collector_ref: collector_ref.into(),
            kilograms,
        }
    }
}

impl Dated for HarvestRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl BatchScoped for HarvestRecord {
    fn batch_id(&self) -> Option<&BatchId> {
        Some(&self.batch_number)
    }

    // A harvest always belongs to exactly one batch.
    fn applies_to(&self, batch: &BatchId) -> bool {
        &self.batch_number == batch
    }
}
