//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and the state machine trait
//! that form the vocabulary of the Berry Sherpa domain.

mod coordinates;
mod errors;
mod ids;
mod probability;
mod state_machine;
mod timestamp;

pub use coordinates::Coordinates;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BatchId, DiagnosisLogId, PredictionLogId, RecordId, UserId};
pub use probability::Probability;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
