//! Diagnosis review status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Review status of a plant diagnosis.
///
/// A diagnosis starts as `Proposed` and is reviewed exactly once by the
/// user, ending `Validated` or `Corrected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosisStatus {
    Proposed,
    Validated,
    Corrected,
}

impl StateMachine for DiagnosisStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DiagnosisStatus::*;
        matches!((self, target), (Proposed, Validated) | (Proposed, Corrected))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DiagnosisStatus::*;
        match self {
            Proposed => vec![Validated, Corrected],
            Validated | Corrected => vec![],
        }
    }
}
