//! Phenology observations (development stage, flower and fruit counts).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{serde_helpers, BatchScoped, Dated};
use crate::domain::foundation::{BatchId, RecordId};

/// Observed development stage of the plants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DevelopmentState {
    Flowering,
    Fruiting,
    Ripening,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhenologyLogEntry {
    pub id: RecordId,
    pub date: NaiveDate,
    pub development_state: DevelopmentState,
    #[serde(default, deserialize_with = "serde_helpers::optional_batch_id")]
    pub batch_id: Option<BatchId>,
    #[serde(default)]
    pub flower_count: Option<u32>,
    #[serde(default)]
    pub fruit_count: Option<u32>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl PhenologyLogEntry {
    pub fn new(id: RecordId, date: NaiveDate, development_state: DevelopmentState) -> Self {
        Self {
            id,
            date,
            development_state,
            batch_id: None,
            flower_count: None,
            fruit_count: None,
            notes: String::new(),
            images: Vec::new(),
        }
    }

    pub fn with_batch(mut self, batch_id: BatchId) -> Self {
        self.batch_id = Some(batch_id);
        self
    }

    pub fn with_counts(mut self, flowers: Option<u32>, fruits: Option<u32>) -> Self {
        self.flower_count = flowers;
        self.fruit_count = fruits;
        self
    }
}

impl Dated for PhenologyLogEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl BatchScoped for PhenologyLogEntry {
    fn batch_id(&self) -> Option<&BatchId> {
        self.batch_id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_optional_counts_missing() {
        let json = r#"{"id": "p-1", "date": "2024-04-20", "developmentState": "Flowering"}"#;
        let entry: PhenologyLogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.development_state, DevelopmentState::Flowering);
        assert!(entry.flower_count.is_none());
        assert!(entry.batch_id.is_none());
    }

    #[test]
    fn serializes_camel_case() {
        let entry = PhenologyLogEntry::new(
            RecordId::new("p-2").unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 21).unwrap(),
            DevelopmentState::Fruiting,
        )
        .with_counts(Some(120), Some(48));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["developmentState"], "Fruiting");
        assert_eq!(json["flowerCount"], 120);
        assert_eq!(json["fruitCount"], 48);
    }
}
