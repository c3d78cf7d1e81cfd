//! Application handlers.
//!
//! Command handlers that orchestrate domain operations across ports.

pub mod advisor;

pub use advisor::{
    ConfirmDiagnosisCommand, ConfirmDiagnosisError, ConfirmDiagnosisHandler, DiagnosePlantHandler,
    FlowRunner, FlowSettings, PredictYieldHandler, PredictYieldResult,
    RecommendApplicationsHandler, SummarizeReportHandler, SummarizeReportResult,
};
