//! Diagnosis log - the persisted record of a reviewed diagnosis.

use serde::{Deserialize, Serialize};

use super::{DiagnosisStatus, PlantDiagnosis};
use crate::domain::foundation::{DiagnosisLogId, DomainError, ErrorCode, Probability, Timestamp};
use crate::domain::records::BatchScope;

/// Record of a diagnosis after the user validated or corrected it.
///
/// The model's result is never modified after creation. A user correction
/// can be attached at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisLog {
    id: DiagnosisLogId,
    date: Timestamp,
    batch_id: BatchScope,
    result: PlantDiagnosis,
    final_diagnosis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    final_probability: Option<Probability>,
    status: DiagnosisStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_correction: Option<String>,
}

impl DiagnosisLog {
    pub(crate) fn new(
        date: Timestamp,
        scope: BatchScope,
        result: PlantDiagnosis,
        final_diagnosis: String,
        final_probability: Option<Probability>,
        status: DiagnosisStatus,
        user_correction: Option<String>,
    ) -> Self {
        Self {
            id: DiagnosisLogId::new(),
            date,
            batch_id: scope,
            result,
            final_diagnosis,
            final_probability,
            status,
            user_correction,
        }
    }

    pub fn id(&self) -> &DiagnosisLogId {
        &self.id
    }

    pub fn date(&self) -> Timestamp {
        self.date
    }

    pub fn scope(&self) -> &BatchScope {
        &self.batch_id
    }

    pub fn result(&self) -> &PlantDiagnosis {
        &self.result
    }

    pub fn final_diagnosis(&self) -> &str {
        &self.final_diagnosis
    }

    pub fn final_probability(&self) -> Option<Probability> {
        self.final_probability
    }

    pub fn status(&self) -> DiagnosisStatus {
        self.status
    }

    pub fn user_correction(&self) -> Option<&str> {
        self.user_correction.as_deref()
    }

    /// Attaches the user's correction text.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the text is blank
    /// - `AlreadyCorrected` if a correction is already attached
    pub fn append_user_correction(&mut self, correction: impl Into<String>) -> Result<(), DomainError> {
        let correction = correction.into();
        if correction.trim().is_empty() {
            return Err(DomainError::new(ErrorCode::EmptyField, "User correction cannot be empty")
                .with_detail("field", "userCorrection"));
        }
        if self.user_correction.is_some() {
            return Err(DomainError::new(
                ErrorCode::AlreadyCorrected,
                "Diagnosis log already has a user correction",
            )
            .with_detail("diagnosis_log_id", self.id.to_string()));
        }
        self.user_correction = Some(correction);
        Ok(())
    }
}
