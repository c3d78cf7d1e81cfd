//! In-Memory Log Repositories
//!
//! Append-only stores for diagnosis and prediction logs.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::advisor::PredictionLog;
use crate::domain::diagnosis::DiagnosisLog;
use crate::domain::foundation::{BatchId, DiagnosisLogId, DomainError, ErrorCode};
use crate::domain::records::BatchScope;
use crate::ports::{DiagnosisLogRepository, PredictionLogRepository};

/// In-memory storage for diagnosis logs
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiagnosisLogRepository {
    logs: Arc<RwLock<HashMap<DiagnosisLogId, DiagnosisLog>>>,
}

impl InMemoryDiagnosisLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored logs
    pub async fn len(&self) -> usize {
        self.logs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.logs.read().await.is_empty()
    }
}

#[async_trait]
impl DiagnosisLogRepository for InMemoryDiagnosisLogRepository {
    async fn create(&self, log: &DiagnosisLog) -> Result<(), DomainError> {
        let mut logs = self.logs.write().await;
        if logs.contains_key(log.id()) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                "Diagnosis log already exists",
            )
            .with_detail("id", log.id().to_string()));
        }
        logs.insert(*log.id(), log.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &DiagnosisLogId) -> Result<Option<DiagnosisLog>, DomainError> {
        Ok(self.logs.read().await.get(id).cloned())
    }

    async fn list_for_scope(&self, scope: &BatchScope) -> Result<Vec<DiagnosisLog>, DomainError> {
        let logs = self.logs.read().await;
        let mut matching: Vec<DiagnosisLog> =
            logs.values().filter(|l| l.scope() == scope).cloned().collect();
        matching.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(matching)
    }
}

/// In-memory storage for prediction logs, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryPredictionLogRepository {
    logs: Arc<RwLock<Vec<PredictionLog>>>,
}

impl InMemoryPredictionLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.logs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.logs.read().await.is_empty()
    }
}

#[async_trait]
impl PredictionLogRepository for InMemoryPredictionLogRepository {
    async fn create(&self, log: &PredictionLog) -> Result<(), DomainError> {
        let mut logs = self.logs.write().await;
        if logs.iter().any(|l| l.id == log.id) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                "Prediction log already exists",
            )
            .with_detail("id", log.id.to_string()));
        }
        logs.push(log.clone());
        Ok(())
    }

    async fn list_for_batch(&self, batch_id: &BatchId) -> Result<Vec<PredictionLog>, DomainError> {
        let logs = self.logs.read().await;
        let mut matching: Vec<PredictionLog> = logs
            .iter()
            .filter(|l| &l.batch_id == batch_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps.
        matching.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::advisor::{Confidence, YieldPrediction};
    use crate::domain::diagnosis::{PlantDiagnosis, ProposedDiagnosis, Verdict};
    use crate::domain::foundation::Timestamp;

    fn reconciled(scope: BatchScope) -> DiagnosisLog {
        let result = PlantDiagnosis {
            primary_diagnosis: "Powdery mildew".to_string(),
            hypotheses: vec![],
            general_recommendation: "Apply sulfur".to_string(),
        };
        ProposedDiagnosis::new(scope, result, Timestamp::now())
            .reconcile(Verdict::Validate, Timestamp::now())
            .unwrap()
    }

    #[tokio::test]
    async fn creates_and_finds_diagnosis_logs() {
        let repo = InMemoryDiagnosisLogRepository::new();
        let log = reconciled(BatchScope::General);

        repo.create(&log).await.unwrap();

        let found = repo.find_by_id(log.id()).await.unwrap().unwrap();
        assert_eq!(found.final_diagnosis(), "Powdery mildew");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn rejects_duplicate_diagnosis_log() {
        let repo = InMemoryDiagnosisLogRepository::new();
        let log = reconciled(BatchScope::General);

        repo.create(&log).await.unwrap();
        let err = repo.create(&log).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
    }

    #[tokio::test]
    async fn lists_diagnosis_logs_by_scope() {
        let repo = InMemoryDiagnosisLogRepository::new();
        let batch = BatchScope::Batch(BatchId::new("L014").unwrap());
        repo.create(&reconciled(batch.clone())).await.unwrap();
        repo.create(&reconciled(BatchScope::General)).await.unwrap();

        assert_eq!(repo.list_for_scope(&batch).await.unwrap().len(), 1);
        assert_eq!(repo.list_for_scope(&BatchScope::General).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn lists_predictions_for_batch() {
        let repo = InMemoryPredictionLogRepository::new();
        let prediction = YieldPrediction {
            prediction: "Stable".to_string(),
            confidence: Confidence::High,
        };
        let l014 = BatchId::new("L014").unwrap();
        repo.create(&PredictionLog::from_prediction(l014.clone(), &prediction, Timestamp::now()))
            .await
            .unwrap();
        repo.create(&PredictionLog::from_prediction(
            BatchId::new("L015").unwrap(),
            &prediction,
            Timestamp::now(),
        ))
        .await
        .unwrap();

        let logs = repo.list_for_batch(&l014).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].confidence, Confidence::High);
    }
}
