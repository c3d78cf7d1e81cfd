//! Advisor module - The AI-assisted decision flows.
//!
//! Holds the flow kinds, their typed requests and outputs, the input
//! assembler that turns record streams into model context, and the system
//! prompts. Orchestration against the model lives in the application layer.

mod assembler;
mod errors;
mod flow;
mod output;
mod prediction_log;
mod prompts;
mod requests;
mod values;

pub use assembler::{
    render_agronomist_logs, render_batch_costs, render_environmental_logs, render_harvests,
    render_phenology_logs, render_supplies, select_recent, AssemblyWindow, FlowInputAssembler,
    NONE_RECORDED,
};
pub use errors::{FlowError, FlowOutcome};
pub use flow::FlowKind;
pub use output::extract_json;
pub use prediction_log::PredictionLog;
pub use prompts::system_prompt;
pub use requests::{
    ApplicationRecommendationRequest, FlowContext, ImageAttachment, PlantDiagnosisRequest,
    ReportSummaryRequest, YieldPredictionRequest,
};
pub use values::{
    ApplicationRecommendation, Confidence, RecommendationSet, ReportSummary, Urgency,
    YieldPrediction,
};
