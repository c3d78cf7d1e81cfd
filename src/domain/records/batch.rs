//! Batch registry and scope resolution.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::BatchId;

/// A planted batch (lot) of strawberry plants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: BatchId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub planted_on: Option<NaiveDate>,
    #[serde(default)]
    pub plant_count: Option<u32>,
}

impl Batch {
    pub fn new(id: BatchId) -> Self {
        Self {
            id,
            name: None,
            planted_on: None,
            plant_count: None,
        }
    }
}

/// Where a log applies: a specific known batch, or the farm in general.
///
/// Serializes as the batch id, or `"general"` when unscoped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BatchScope {
    Batch(BatchId),
    General,
}

impl BatchScope {
    pub const GENERAL: &'static str = "general";

    pub fn batch_id(&self) -> Option<&BatchId> {
        match self {
            BatchScope::Batch(id) => Some(id),
            BatchScope::General => None,
        }
    }

    pub fn is_general(&self) -> bool {
        matches!(self, BatchScope::General)
    }
}

impl fmt::Display for BatchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchScope::Batch(id) => write!(f, "{}", id),
            BatchScope::General => write!(f, "{}", Self::GENERAL),
        }
    }
}

impl From<BatchScope> for String {
    fn from(scope: BatchScope) -> Self {
        scope.to_string()
    }
}

impl TryFrom<String> for BatchScope {
    type Error = std::convert::Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case(Self::GENERAL) {
            return Ok(BatchScope::General);
        }
        Ok(BatchId::new(value).map_or(BatchScope::General, BatchScope::Batch))
    }
}

/// Registry of the batches known to the farm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchRegistry {
    batches: BTreeMap<BatchId, Batch>,
}

impl BatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_batches(batches: impl IntoIterator<Item = Batch>) -> Self {
        let batches = batches.into_iter().map(|b| (b.id.clone(), b)).collect();
        Self { batches }
    }

    pub fn register(&mut self, batch: Batch) {
        self.batches.insert(batch.id.clone(), batch);
    }

    pub fn contains(&self, id: &BatchId) -> bool {
        self.batches.contains_key(id)
    }

    pub fn get(&self, id: &BatchId) -> Option<&Batch> {
        self.batches.get(id)
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Resolves a raw batch reference to a scope.
    ///
    /// Absent, blank and unknown ids resolve to `General`.
    pub fn scope_for(&self, raw: Option<&str>) -> BatchScope {
        raw.and_then(|s| BatchId::new(s).ok())
            .filter(|id| self.contains(id))
            .map_or(BatchScope::General, BatchScope::Batch)
    }
}
