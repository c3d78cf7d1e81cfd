//! Diagnosis module - Review of model plant diagnoses.
//!
//! A plant diagnosis flows through three steps:
//!
//! 1. The model returns a `PlantDiagnosis`, wrapped as a `ProposedDiagnosis`
//! 2. The user validates it or picks a correction (`Verdict`)
//! 3. `ProposedDiagnosis::reconcile` produces the `DiagnosisLog` to persist

mod log;
mod reconciler;
mod result;
mod status;

pub use log::DiagnosisLog;
pub use reconciler::{CorrectionChoice, ProposedDiagnosis, ReconcileError, Verdict};
pub use result::{DiagnosisHypothesis, PlantDiagnosis};
pub use status::DiagnosisStatus;
