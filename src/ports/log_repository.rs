//! Log repository ports - Append-only persistence for flow audit logs.
//!
//! Diagnosis and prediction logs are written once and never updated by the
//! decision core. Implementations map failures onto `DomainError` with
//! `ErrorCode::StorageError`.

use async_trait::async_trait;

use crate::domain::advisor::PredictionLog;
use crate::domain::diagnosis::DiagnosisLog;
use crate::domain::foundation::{BatchId, DiagnosisLogId, DomainError};
use crate::domain::records::BatchScope;

/// Repository port for reconciled diagnosis logs.
#[async_trait]
pub trait DiagnosisLogRepository: Send + Sync {
    /// Persist a new diagnosis log.
    ///
    /// # Errors
    ///
    /// - `StorageError` if a log with the same id already exists or the write fails
    async fn create(&self, log: &DiagnosisLog) -> Result<(), DomainError>;

    /// Find a diagnosis log by id.
    async fn find_by_id(&self, id: &DiagnosisLogId) -> Result<Option<DiagnosisLog>, DomainError>;

    /// All logs for a scope, newest first.
    async fn list_for_scope(&self, scope: &BatchScope) -> Result<Vec<DiagnosisLog>, DomainError>;
}

/// Repository port for yield prediction logs.
#[async_trait]
pub trait PredictionLogRepository: Send + Sync {
    /// Persist a new prediction log.
    async fn create(&self, log: &PredictionLog) -> Result<(), DomainError>;

    /// All predictions for a batch, newest first.
    async fn list_for_batch(&self, batch_id: &BatchId) -> Result<Vec<PredictionLog>, DomainError>;
}
