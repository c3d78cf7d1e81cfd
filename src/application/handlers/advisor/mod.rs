//! Advisor handlers - One handler per decision flow plus diagnosis review.
//!
//! All model-backed handlers share a `FlowRunner`.

mod confirm_diagnosis;
mod diagnose_plant;
mod flow_runner;
mod predict_yield;
mod recommend_applications;
mod summarize_report;

pub use confirm_diagnosis::{ConfirmDiagnosisCommand, ConfirmDiagnosisError, ConfirmDiagnosisHandler};
pub use diagnose_plant::DiagnosePlantHandler;
pub use flow_runner::{FlowRunner, FlowSettings};
pub use predict_yield::{PredictYieldHandler, PredictYieldResult};
pub use recommend_applications::RecommendApplicationsHandler;
pub use summarize_report::{SummarizeReportHandler, SummarizeReportResult};
