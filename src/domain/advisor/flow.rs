//! Decision flow kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The decision flows the advisor runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    YieldPrediction,
    ApplicationRecommendation,
    PlantDiagnosis,
    ReportSummary,
}

impl FlowKind {
    /// All flows in canonical order.
    pub fn all() -> &'static [FlowKind] {
        &[
            FlowKind::YieldPrediction,
            FlowKind::ApplicationRecommendation,
            FlowKind::PlantDiagnosis,
            FlowKind::ReportSummary,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::YieldPrediction => "yield_prediction",
            FlowKind::ApplicationRecommendation => "application_recommendation",
            FlowKind::PlantDiagnosis => "plant_diagnosis",
            FlowKind::ReportSummary => "report_summary",
        }
    }

    /// Whether the weather tool is offered to the model in this flow.
    pub fn uses_weather_tool(&self) -> bool {
        matches!(
            self,
            FlowKind::YieldPrediction | FlowKind::ApplicationRecommendation
        )
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_field_flows_use_weather() {
        assert!(FlowKind::YieldPrediction.uses_weather_tool());
        assert!(FlowKind::ApplicationRecommendation.uses_weather_tool());
        assert!(!FlowKind::PlantDiagnosis.uses_weather_tool());
        assert!(!FlowKind::ReportSummary.uses_weather_tool());
    }

    #[test]
    fn display_matches_serialized_name() {
        for flow in FlowKind::all() {
            let json = serde_json::to_value(flow).unwrap();
            assert_eq!(json, flow.to_string());
        }
    }
}
