//! Plant diagnosis result as returned by the model.
//!
//! Wire names are kept in Spanish because stored diagnosis logs and the
//! client application use them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Probability;

/// One candidate diagnosis with its estimated probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisHypothesis {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "probabilidad")]
    pub probability: Probability,
    #[serde(rename = "descripcion")]
    pub description: String,
}

/// Structured diagnosis of a plant photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantDiagnosis {
    #[serde(rename = "diagnosticoPrincipal")]
    pub primary_diagnosis: String,
    #[serde(rename = "posiblesDiagnosticos")]
    pub hypotheses: Vec<DiagnosisHypothesis>,
    #[serde(rename = "recomendacionGeneral")]
    pub general_recommendation: String,
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl PlantDiagnosis {
    /// Finds a hypothesis by name, ignoring case and surrounding whitespace.
    pub fn hypothesis_named(&self, name: &str) -> Option<&DiagnosisHypothesis> {
        self.hypotheses.iter().find(|h| same_name(&h.name, name))
    }

    /// True when `name` refers to the primary diagnosis.
    pub fn is_primary(&self, name: &str) -> bool {
        same_name(&self.primary_diagnosis, name)
    }

    /// Probability of the primary diagnosis, if the model listed it as a hypothesis.
    pub fn primary_probability(&self) -> Option<Probability> {
        self.hypothesis_named(&self.primary_diagnosis)
            .map(|h| h.probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnosis() -> PlantDiagnosis {
        serde_json::from_value(serde_json::json!({
            "diagnosticoPrincipal": "Botrytis cinerea",
            "posiblesDiagnosticos": [
                {"nombre": "botrytis cinerea ", "probabilidad": 72, "descripcion": "Grey mould on fruit"},
                {"nombre": "Mildiu polvoso", "probabilidad": 20.5, "descripcion": "White powder on leaves"}
            ],
            "recomendacionGeneral": "Remove affected fruit and improve ventilation"
        }))
        .unwrap()
    }

    #[test]
    fn deserializes_spanish_wire_names() {
        let d = diagnosis();
        assert_eq!(d.primary_diagnosis, "Botrytis cinerea");
        assert_eq!(d.hypotheses.len(), 2);
        assert_eq!(d.hypotheses[1].probability.value(), 20.5);
    }

    #[test]
    fn serializes_spanish_wire_names() {
        let json = serde_json::to_value(diagnosis()).unwrap();
        assert!(json.get("diagnosticoPrincipal").is_some());
        assert_eq!(json["posiblesDiagnosticos"][0]["probabilidad"], 72.0);
        assert!(json["posiblesDiagnosticos"][0].get("nombre").is_some());
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let result: Result<PlantDiagnosis, _> = serde_json::from_value(serde_json::json!({
            "diagnosticoPrincipal": "X",
            "posiblesDiagnosticos": [{"nombre": "X", "probabilidad": 120, "descripcion": "d"}],
            "recomendacionGeneral": "r"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn hypothesis_lookup_ignores_case_and_padding() {
        let d = diagnosis();
        assert!(d.hypothesis_named("MILDIU POLVOSO").is_some());
        assert!(d.hypothesis_named("Antracnosis").is_none());
        assert_eq!(d.primary_probability().map(|p| p.value()), Some(72.0));
        assert!(d.is_primary("  botrytis CINEREA"));
    }

    #[test]
    fn primary_probability_absent_when_not_listed() {
        let mut d = diagnosis();
        d.primary_diagnosis = "Deficiencia de hierro".to_string();
        assert!(d.primary_probability().is_none());
    }
}
