//! Confirm/correct reconciliation of a proposed diagnosis.

use thiserror::Error;

use super::{DiagnosisLog, DiagnosisStatus, PlantDiagnosis};
use crate::domain::foundation::{StateMachine, Timestamp, ValidationError};
use crate::domain::records::BatchScope;

/// A model diagnosis awaiting the user's review.
///
/// Nothing is persisted while the diagnosis is proposed. Dropping it
/// abandons the review.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposedDiagnosis {
    pub scope: BatchScope,
    pub result: PlantDiagnosis,
    pub proposed_at: Timestamp,
}

/// What the user chose instead of the primary diagnosis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionChoice {
    /// One of the hypotheses the model listed, by name.
    Hypothesis(String),
    /// Free text entered by the user.
    Other(String),
}

/// The user's review of a proposed diagnosis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Accept the primary diagnosis.
    Validate,
    /// Replace the primary diagnosis.
    Correct {
        choice: CorrectionChoice,
        note: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconcileError {
    #[error("'{name}' is not one of the proposed hypotheses")]
    UnknownHypothesis { name: String },

    #[error("Corrected diagnosis text cannot be empty")]
    EmptyCorrection,

    #[error("'{name}' is the primary diagnosis; validate it instead of correcting")]
    CorrectionMatchesPrimary { name: String },

    #[error("Invalid review transition: {0}")]
    InvalidTransition(#[from] ValidationError),
}

impl ProposedDiagnosis {
    pub fn new(scope: BatchScope, result: PlantDiagnosis, proposed_at: Timestamp) -> Self {
        Self {
            scope,
            result,
            proposed_at,
        }
    }

    pub fn status(&self) -> DiagnosisStatus {
        DiagnosisStatus::Proposed
    }

    /// Applies the user's verdict and produces the log to persist.
    ///
    /// Consumes the proposal so a diagnosis is reconciled at most once.
    ///
    /// # Errors
    ///
    /// - `UnknownHypothesis` if the chosen hypothesis was not proposed
    /// - `EmptyCorrection` if the free-text correction is blank
    /// - `CorrectionMatchesPrimary` if the correction names the primary diagnosis
    pub fn reconcile(self, verdict: Verdict, now: Timestamp) -> Result<DiagnosisLog, ReconcileError> {
        match verdict {
            Verdict::Validate => {
                let status = self.status().transition_to(DiagnosisStatus::Validated)?;
                let final_diagnosis = self.result.primary_diagnosis.clone();
                let probability = self.result.primary_probability();
                Ok(DiagnosisLog::new(
                    now,
                    self.scope,
                    self.result,
                    final_diagnosis,
                    probability,
                    status,
                    None,
                ))
            }
            Verdict::Correct { choice, note } => {
                let (final_diagnosis, probability) = match &choice {
                    CorrectionChoice::Hypothesis(name) => {
                        let hypothesis = self.result.hypothesis_named(name).ok_or_else(|| {
                            ReconcileError::UnknownHypothesis { name: name.clone() }
                        })?;
                        (hypothesis.name.trim().to_string(), Some(hypothesis.probability))
                    }
                    CorrectionChoice::Other(text) => {
                        let text = text.trim();
                        if text.is_empty() {
                            return Err(ReconcileError::EmptyCorrection);
                        }
                        (text.to_string(), None)
                    }
                };

                if self.result.is_primary(&final_diagnosis) {
                    return Err(ReconcileError::CorrectionMatchesPrimary {
                        name: final_diagnosis,
                    });
                }

                let status = self.status().transition_to(DiagnosisStatus::Corrected)?;
                let correction =
                    correction_text(&self.result.primary_diagnosis, &final_diagnosis, note.as_deref());

                Ok(DiagnosisLog::new(
                    now,
                    self.scope,
                    self.result,
                    final_diagnosis,
                    probability,
                    status,
                    Some(correction),
                ))
            }
        }
    }
}

fn correction_text(primary: &str, selected: &str, note: Option<&str>) -> String {
    let mut text = format!("Model diagnosis: {}. User selection: {}.", primary, selected);
    if let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) {
        text.push_str(" Note: ");
        text.push_str(note);
    }
    text
}
