//! Application layer - Flow handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers receive an explicit `FlowContext` and owned record snapshots.

pub mod handlers;

pub use handlers::{
    ConfirmDiagnosisCommand, ConfirmDiagnosisError, ConfirmDiagnosisHandler, DiagnosePlantHandler,
    FlowRunner, FlowSettings, PredictYieldHandler, PredictYieldResult,
    RecommendApplicationsHandler, SummarizeReportHandler, SummarizeReportResult,
};
