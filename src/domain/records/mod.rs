//! Records module - Farm record collections the decision core reads.
//!
//! These are the documents the farm-management application keeps for each
//! farm: field logs written by the agronomist, phenology observations,
//! harvests, supply inventory, and the cost lineage (payments and
//! transactions) used for profitability.
//!
//! All types serialize with camelCase field names so snapshots exported from
//! the document store can be loaded directly.

mod agronomist;
mod batch;
mod harvest;
mod ledger;
mod payments;
mod phenology;
mod supply;
mod transaction;

pub use agronomist::{AgronomistLogEntry, AgronomistLogType};
pub use batch::{Batch, BatchRegistry, BatchScope};
pub use harvest::HarvestRecord;
pub use ledger::{FarmRecords, RemovedHarvest};
pub use payments::{CollectorPaymentLog, CulturalPracticeLog, PackagingLog};
pub use phenology::{DevelopmentState, PhenologyLogEntry};
pub use supply::{SupplyItem, SupplyType};
pub use transaction::{Transaction, TransactionKind};

use chrono::NaiveDate;

use crate::domain::foundation::BatchId;

/// A record that carries a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// A record optionally scoped to a batch.
pub trait BatchScoped {
    fn batch_id(&self) -> Option<&BatchId>;

    /// True when the record belongs to `batch` or is unscoped (general).
    fn applies_to(&self, batch: &BatchId) -> bool {
        self.batch_id().map_or(true, |id| id == batch)
    }
}

pub(crate) mod serde_helpers {
    use serde::{Deserialize, Deserializer};

    use crate::domain::foundation::BatchId;

    /// Reads an optional batch id, treating missing, null and blank values as unscoped.
    pub fn optional_batch_id<'de, D>(deserializer: D) -> Result<Option<BatchId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|s| BatchId::new(s).ok()))
    }
}
