//! Cost lineage: payment logs tied to the activity that produced them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{serde_helpers, BatchScoped, Dated};
use crate::domain::foundation::{BatchId, RecordId};

/// Payment to a collector for a specific harvest.
///
/// Lives and dies with its harvest: removing the harvest removes this log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorPaymentLog {
    pub id: RecordId,
    pub date: NaiveDate,
    pub harvest_id: RecordId,
    #[serde(default)]
    pub collector_ref: String,
    #[serde(default)]
    pub kilograms: f64,
    pub payment: f64,
}

impl CollectorPaymentLog {
    pub fn new(id: RecordId, date: NaiveDate, harvest_id: RecordId, payment: f64) -> Self {
        Self {
            id,
            date,
            harvest_id,
            collector_ref: String::new(),
            kilograms: 0.0,
            payment,
        }
    }
}

/// Payment for packaging work, optionally linked to a harvest or batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingLog {
    pub id: RecordId,
    pub date: NaiveDate,
    #[serde(default)]
    pub harvest_id: Option<RecordId>,
    #[serde(default, deserialize_with = "serde_helpers::optional_batch_id")]
    pub batch_id: Option<BatchId>,
    #[serde(default)]
    pub personnel_ref: String,
    pub payment: f64,
}

/// Payment for cultural-practice labor (pruning, weeding, ...) on a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalPracticeLog {
    pub id: RecordId,
    pub date: NaiveDate,
    pub batch_id: BatchId,
    #[serde(default)]
    pub personnel_ref: String,
    #[serde(default)]
    pub activity: String,
    pub payment: f64,
}

impl CulturalPracticeLog {
    pub fn new(
        id: RecordId,
        date: NaiveDate,
        batch_id: BatchId,
        activity: impl Into<String>,
        payment: f64,
    ) -> Self {
        Self {
            id,
            date,
            batch_id,
            personnel_ref: String::new(),
            activity: activity.into(),
            payment,
        }
    }
}

impl Dated for CollectorPaymentLog {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for CulturalPracticeLog {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl BatchScoped for CulturalPracticeLog {
    fn batch_id(&self) -> Option<&BatchId> {
        Some(&self.batch_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_payment_deserializes_with_defaults() {
        let json = r#"{"id": "cp-1", "date": "2024-05-10", "harvestId": "h-1", "payment": 45}"#;
        let log: CollectorPaymentLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.harvest_id.as_str(), "h-1");
        assert_eq!(log.payment, 45.0);
        assert_eq!(log.kilograms, 0.0);
    }

    #[test]
    fn packaging_log_links_are_optional() {
        let json = r#"{"id": "pk-1", "date": "2024-05-10", "payment": 12.5}"#;
        let log: PackagingLog = serde_json::from_str(json).unwrap();
        assert!(log.harvest_id.is_none());
        assert!(log.batch_id.is_none());
    }

    #[test]
    fn cultural_practice_requires_batch() {
        let json = r#"{"id": "cu-1", "date": "2024-05-10", "payment": 30}"#;
        assert!(serde_json::from_str::<CulturalPracticeLog>(json).is_err());
    }
}
