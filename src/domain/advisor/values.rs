//! Typed outputs of the decision flows.

use serde::{Deserialize, Serialize};

/// Confidence the model assigns to a yield prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub const ALL: [&'static str; 3] = ["High", "Medium", "Low"];
}

/// Urgency of an application recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    pub const ALL: [&'static str; 3] = ["High", "Medium", "Low"];
}

/// Yield outlook for a batch.
///
/// `prediction` is free text; any percentage change it mentions is
/// informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldPrediction {
    pub prediction: String,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecommendation {
    pub recommendation: String,
    pub reason: String,
    pub urgency: Urgency,
    #[serde(default)]
    pub suggested_products: Vec<String>,
}

/// Recommended applications, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub recommendations: Vec<ApplicationRecommendation>,
}

impl RecommendationSet {
    /// Recommendations ordered from most to least urgent.
    pub fn by_urgency(&self) -> Vec<&ApplicationRecommendation> {
        let mut sorted: Vec<_> = self.recommendations.iter().collect();
        sorted.sort_by_key(|r| r.urgency);
        sorted
    }
}

/// Narrative summary of a farm report period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub summary: String,
    pub highlights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_deserializes_camel_case() {
        let set: RecommendationSet = serde_json::from_value(serde_json::json!({
            "recommendations": [{
                "recommendation": "Apply fungicide",
                "reason": "Rain expected",
                "urgency": "High",
                "suggestedProducts": ["Captan 50"]
            }]
        }))
        .unwrap();

        assert_eq!(set.recommendations[0].urgency, Urgency::High);
        assert_eq!(set.recommendations[0].suggested_products, vec!["Captan 50"]);
    }

    #[test]
    fn by_urgency_puts_high_first() {
        let rec = |urgency| ApplicationRecommendation {
            recommendation: "r".into(),
            reason: "why".into(),
            urgency,
            suggested_products: vec![],
        };
        let set = RecommendationSet {
            recommendations: vec![rec(Urgency::Low), rec(Urgency::High), rec(Urgency::Medium)],
        };
        let order: Vec<_> = set.by_urgency().iter().map(|r| r.urgency).collect();
        assert_eq!(order, vec![Urgency::High, Urgency::Medium, Urgency::Low]);
    }

    #[test]
    fn confidence_rejects_unknown_values() {
        let result: Result<YieldPrediction, _> = serde_json::from_value(serde_json::json!({
            "prediction": "Up 10%",
            "confidence": "Certain"
        }));
        assert!(result.is_err());
    }
}
