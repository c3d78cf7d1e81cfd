//! State machine trait for status enums.
//!
//! Gives lifecycle statuses (such as the diagnosis review status) one way to
//! validate and perform transitions.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DiagnosisStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Proposed, Validated) | (Proposed, Corrected))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Proposed => vec![Validated, Corrected],
///             Validated | Corrected => vec![],
///         }
///     }
/// }
///
/// let status = DiagnosisStatus::Proposed.transition_to(DiagnosisStatus::Validated)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum PlantingStage {
        Planned,
        Planted,
        Harvesting,
        Closed,
    }

    impl StateMachine for PlantingStage {
        fn can_transition_to(&self, target: &Self) -> bool {
            use PlantingStage::*;
            matches!(
                (self, target),
                (Planned, Planted) | (Planted, Harvesting) | (Planted, Closed) | (Harvesting, Closed)
            )
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use PlantingStage::*;
            match self {
                Planned => vec![Planted],
                Planted => vec![Harvesting, Closed],
                Harvesting => vec![Closed],
                Closed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = PlantingStage::Planned.transition_to(PlantingStage::Planted);
        assert_eq!(result, Ok(PlantingStage::Planted));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = PlantingStage::Planned.transition_to(PlantingStage::Harvesting);
        assert!(result.is_err());
    }

    #[test]
    fn only_closed_is_terminal() {
        assert!(PlantingStage::Closed.is_terminal());
        assert!(!PlantingStage::Planned.is_terminal());
        assert!(!PlantingStage::Harvesting.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for stage in [
            PlantingStage::Planned,
            PlantingStage::Planted,
            PlantingStage::Harvesting,
            PlantingStage::Closed,
        ] {
            for target in stage.valid_transitions() {
                assert!(
                    stage.can_transition_to(&target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    stage,
                    target
                );
            }
        }
    }
}
