//! FarmRecords - an owned snapshot of a farm's record collections.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    AgronomistLogEntry, Batch, BatchRegistry, CollectorPaymentLog, CulturalPracticeLog,
    HarvestRecord, PackagingLog, PhenologyLogEntry, SupplyItem, Transaction,
};
use crate::domain::analysis::{compute_batch_profitability, BatchCostSummary};
use crate::domain::foundation::{DomainError, ErrorCode, RecordId};

/// Snapshot of every collection the decision core reads.
///
/// Missing collections deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmRecords {
    pub batches: Vec<Batch>,
    pub harvests: Vec<HarvestRecord>,
    pub collector_payments: Vec<CollectorPaymentLog>,
    pub packaging_logs: Vec<PackagingLog>,
    pub cultural_practice_logs: Vec<CulturalPracticeLog>,
    pub agronomist_logs: Vec<AgronomistLogEntry>,
    pub phenology_logs: Vec<PhenologyLogEntry>,
    pub supplies: Vec<SupplyItem>,
    pub transactions: Vec<Transaction>,
}

/// Records removed together with a harvest.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedHarvest {
    pub harvest: HarvestRecord,
    pub collector_payments: Vec<CollectorPaymentLog>,
    pub packaging_logs: Vec<PackagingLog>,
}

impl FarmRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| {
            DomainError::new(ErrorCode::InvalidFormat, "Invalid farm records snapshot")
                .with_detail("reason", e.to_string())
        })
    }

    /// Reads and parses a snapshot file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DomainError::new(ErrorCode::StorageError, "Failed to read farm records snapshot")
                .with_detail("path", path.display().to_string())
                .with_detail("reason", e.to_string())
        })?;
        Self::from_json_str(&contents)
    }

    /// Registry of declared batches plus every batch that has a harvest.
    pub fn batch_registry(&self) -> BatchRegistry {
        let mut registry = BatchRegistry::from_batches(self.batches.iter().cloned());
        for harvest in &self.harvests {
            if !registry.contains(&harvest.batch_number) {
                registry.register(Batch::new(harvest.batch_number.clone()));
            }
        }
        registry
    }

    /// Removes a harvest and every payment log that depends on it.
    ///
    /// Collector payments referencing the harvest and packaging logs linked to
    /// it are removed in the same operation and returned to the caller.
    pub fn remove_harvest(&mut self, id: &RecordId) -> Result<RemovedHarvest, DomainError> {
        let position = self.harvests.iter().position(|h| &h.id == id).ok_or_else(|| {
            DomainError::new(ErrorCode::HarvestNotFound, "Harvest not found")
                .with_detail("harvest_id", id.to_string())
        })?;
        let harvest = self.harvests.remove(position);

        let (collector_payments, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.collector_payments)
            .into_iter()
            .partition(|p| &p.harvest_id == id);
        self.collector_payments = kept;

        let (packaging_logs, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.packaging_logs)
            .into_iter()
            .partition(|p| p.harvest_id.as_ref() == Some(id));
        self.packaging_logs = kept;

        debug!(
            harvest_id = %id,
            collector_payments = collector_payments.len(),
            packaging_logs = packaging_logs.len(),
            "Removed harvest with dependent payment logs"
        );

        Ok(RemovedHarvest {
            harvest,
            collector_payments,
            packaging_logs,
        })
    }

    /// Per-batch cost summaries for the whole snapshot.
    pub fn batch_profitability(&self) -> Vec<BatchCostSummary> {
        compute_batch_profitability(
            &self.harvests,
            &self.collector_payments,
            &self.cultural_practice_logs,
            &self.agronomist_logs,
            &self.transactions,
        )
    }
}
