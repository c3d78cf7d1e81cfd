//! ConfirmDiagnosisHandler - Persists the reviewed outcome of a diagnosis.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::domain::advisor::FlowContext;
use crate::domain::diagnosis::{DiagnosisLog, ProposedDiagnosis, ReconcileError, Verdict};
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::DiagnosisLogRepository;

/// Command carrying the user's verdict on a proposal.
#[derive(Debug, Clone)]
pub struct ConfirmDiagnosisCommand {
    pub proposal: ProposedDiagnosis,
    pub verdict: Verdict,
}

#[derive(Debug, Error)]
pub enum ConfirmDiagnosisError {
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error("failed to store diagnosis log: {0}")]
    Persistence(DomainError),
}

pub struct ConfirmDiagnosisHandler {
    logs: Arc<dyn DiagnosisLogRepository>,
}

impl ConfirmDiagnosisHandler {
    pub fn new(logs: Arc<dyn DiagnosisLogRepository>) -> Self {
        Self { logs }
    }

    /// Reconciles the proposal and writes the resulting log once.
    pub async fn handle(
        &self,
        context: &FlowContext,
        cmd: ConfirmDiagnosisCommand,
    ) -> Result<DiagnosisLog, ConfirmDiagnosisError> {
        let log = cmd.proposal.reconcile(cmd.verdict, Timestamp::now())?;

        self.logs
            .create(&log)
            .await
            .map_err(ConfirmDiagnosisError::Persistence)?;

        info!(
            trace_id = %context.trace_id,
            log_id = %log.id(),
            batch_id = %log.scope(),
            status = ?log.status(),
            final_diagnosis = %log.final_diagnosis(),
            "Diagnosis log stored"
        );
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryDiagnosisLogRepository;
    use crate::domain::diagnosis::{CorrectionChoice, DiagnosisHypothesis, DiagnosisStatus, PlantDiagnosis};
    use crate::domain::foundation::{Probability, UserId};
    use crate::domain::records::BatchScope;
    use chrono::NaiveDate;

    fn context() -> FlowContext {
        FlowContext::new(
            UserId::new("grower-1").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        )
    }

    fn proposal() -> ProposedDiagnosis {
        let hypothesis = |name: &str, p: f64| DiagnosisHypothesis {
            name: name.to_string(),
            probability: Probability::try_new(p).unwrap(),
            description: String::new(),
        };
        ProposedDiagnosis::new(
            BatchScope::General,
            PlantDiagnosis {
                primary_diagnosis: "Botrytis".to_string(),
                hypotheses: vec![hypothesis("Botrytis", 70.0), hypothesis("Anthracnose", 20.0)],
                general_recommendation: "Remove infected fruit".to_string(),
            },
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn stores_validated_log() {
        let repo = Arc::new(InMemoryDiagnosisLogRepository::new());
        let handler = ConfirmDiagnosisHandler::new(repo.clone());

        let log = handler
            .handle(
                &context(),
                ConfirmDiagnosisCommand {
                    proposal: proposal(),
                    verdict: Verdict::Validate,
                },
            )
            .await
            .unwrap();

        assert_eq!(log.status(), DiagnosisStatus::Validated);
        assert!(repo.find_by_id(log.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn rejected_correction_stores_nothing() {
        let repo = Arc::new(InMemoryDiagnosisLogRepository::new());
        let handler = ConfirmDiagnosisHandler::new(repo.clone());

        let err = handler
            .handle(
                &context(),
                ConfirmDiagnosisCommand {
                    proposal: proposal(),
                    verdict: Verdict::Correct {
                        choice: CorrectionChoice::Hypothesis("Powdery mildew".to_string()),
                        note: None,
                    },
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ConfirmDiagnosisError::Reconcile(ReconcileError::UnknownHypothesis { .. })
        ));
        assert!(repo.is_empty().await);
    }
}
