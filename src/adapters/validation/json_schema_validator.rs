//! JSON Schema Validator - Implementation of FlowOutputValidator.
//!
//! Uses manual validation against embedded JSON Schema definitions. The
//! schemas are sent to the model with each request; the checks below
//! enforce the same constraints on the answer.

use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

use crate::domain::advisor::{Confidence, FlowKind, Urgency};
use crate::ports::{FlowOutputValidator, SchemaValidationError};

static YIELD_PREDICTION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "YieldPrediction",
        "type": "object",
        "required": ["prediction", "confidence"],
        "properties": {
            "prediction": { "type": "string", "minLength": 1 },
            "confidence": { "type": "string", "enum": Confidence::ALL }
        },
        "additionalProperties": false
    })
});

static APPLICATION_RECOMMENDATION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "RecommendationSet",
        "type": "object",
        "required": ["recommendations"],
        "properties": {
            "recommendations": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["recommendation", "reason", "urgency"],
                    "properties": {
                        "recommendation": { "type": "string", "minLength": 1 },
                        "reason": { "type": "string", "minLength": 1 },
                        "urgency": { "type": "string", "enum": Urgency::ALL },
                        "suggestedProducts": { "type": "array", "items": { "type": "string" } }
                    }
                }
            }
        }
    })
});

static PLANT_DIAGNOSIS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "PlantDiagnosis",
        "type": "object",
        "required": ["diagnosticoPrincipal", "posiblesDiagnosticos", "recomendacionGeneral"],
        "properties": {
            "diagnosticoPrincipal": { "type": "string", "minLength": 1 },
            "posiblesDiagnosticos": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["nombre", "probabilidad", "descripcion"],
                    "properties": {
                        "nombre": { "type": "string", "minLength": 1 },
                        "probabilidad": { "type": "number", "minimum": 0, "maximum": 100 },
                        "descripcion": { "type": "string" }
                    }
                }
            },
            "recomendacionGeneral": { "type": "string", "minLength": 1 }
        }
    })
});

static REPORT_SUMMARY_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "ReportSummary",
        "type": "object",
        "required": ["summary", "highlights"],
        "properties": {
            "summary": { "type": "string", "minLength": 1 },
            "highlights": {
                "type": "array",
                "minItems": 1,
                "items": { "type": "string", "minLength": 1 }
            }
        }
    })
});

/// JSON Schema-based validator implementation.
///
/// This struct is `Send + Sync` and can be shared across handlers.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSchemaValidator;

impl JsonSchemaValidator {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    // Flow-specific validators
    // =========================================================================

    fn validate_yield_prediction(&self, output: &Value) -> Result<(), SchemaValidationError> {
        let obj = self.require_object(output, "root")?;
        self.require_all(obj, &["prediction", "confidence"])?;

        self.require_non_empty_string(obj, "prediction", "root")?;
        if let Some(confidence) = obj.get("confidence") {
            self.validate_enum(confidence, &Confidence::ALL, "confidence")?;
        }
        Ok(())
    }

    fn validate_recommendations(&self, output: &Value) -> Result<(), SchemaValidationError> {
        let obj = self.require_object(output, "root")?;
        self.require_all(obj, &["recommendations"])?;

        let items = self.require_array(obj, "recommendations", "root", 1)?;
        for (i, item) in items.iter().enumerate() {
            self.validate_recommendation(item, &format!("recommendations[{}]", i))?;
        }
        Ok(())
    }

    fn validate_recommendation(&self, value: &Value, path: &str) -> Result<(), SchemaValidationError> {
        let obj = self.require_object(value, path)?;
        self.require_non_empty_string(obj, "recommendation", path)?;
        self.require_non_empty_string(obj, "reason", path)?;
        self.require_field(obj, "urgency", path)?;
        if let Some(urgency) = obj.get("urgency") {
            self.validate_enum(urgency, &Urgency::ALL, &format!("{}.urgency", path))?;
        }
        if !obj.contains_key("suggestedProducts") {
            return Ok(());
        }
        let products = self.require_array(obj, "suggestedProducts", path, 0)?;
        for (i, product) in products.iter().enumerate() {
            if !product.is_string() {
                return Err(SchemaValidationError::InvalidType {
                    field: format!("{}.suggestedProducts[{}]", path, i),
                    expected: "string".to_string(),
                    actual: Self::type_name(product),
                });
            }
        }
        Ok(())
    }

    fn validate_plant_diagnosis(&self, output: &Value) -> Result<(), SchemaValidationError> {
        let obj = self.require_object(output, "root")?;
        self.require_all(
            obj,
            &["diagnosticoPrincipal", "posiblesDiagnosticos", "recomendacionGeneral"],
        )?;

        self.require_non_empty_string(obj, "diagnosticoPrincipal", "root")?;
        self.require_non_empty_string(obj, "recomendacionGeneral", "root")?;
        let hypotheses = self.require_array(obj, "posiblesDiagnosticos", "root", 0)?;
        for (i, item) in hypotheses.iter().enumerate() {
            self.validate_hypothesis(item, &format!("posiblesDiagnosticos[{}]", i))?;
        }
        Ok(())
    }

    fn validate_hypothesis(&self, value: &Value, path: &str) -> Result<(), SchemaValidationError> {
        let obj = self.require_object(value, path)?;
        self.require_non_empty_string(obj, "nombre", path)?;
        self.require_string_field(obj, "descripcion", path)?;

        self.require_field(obj, "probabilidad", path)?;
        if let Some(probability) = obj.get("probabilidad") {
            let Some(p) = probability.as_f64() else {
                return Err(SchemaValidationError::InvalidType {
                    field: format!("{}.probabilidad", path),
                    expected: "number".to_string(),
                    actual: Self::type_name(probability),
                });
            };
            if !(0.0..=100.0).contains(&p) {
                return Err(SchemaValidationError::OutOfRange {
                    field: format!("{}.probabilidad", path),
                    value: p.to_string(),
                    min: "0".to_string(),
                    max: "100".to_string(),
                });
            }
        }
        Ok(())
    }

    fn validate_report_summary(&self, output: &Value) -> Result<(), SchemaValidationError> {
        let obj = self.require_object(output, "root")?;
        self.require_all(obj, &["summary", "highlights"])?;

        self.require_non_empty_string(obj, "summary", "root")?;
        let highlights = self.require_array(obj, "highlights", "root", 1)?;
        for (i, highlight) in highlights.iter().enumerate() {
            match highlight.as_str() {
                Some(s) if !s.trim().is_empty() => {}
                Some(_) => {
                    return Err(SchemaValidationError::Generic {
                        message: format!("highlights[{}] must not be empty", i),
                    })
                }
                None => {
                    return Err(SchemaValidationError::InvalidType {
                        field: format!("highlights[{}]", i),
                        expected: "string".to_string(),
                        actual: Self::type_name(highlight),
                    })
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn require_object<'a>(
        &self,
        value: &'a Value,
        path: &str,
    ) -> Result<&'a Map<String, Value>, SchemaValidationError> {
        value.as_object().ok_or_else(|| SchemaValidationError::InvalidType {
            field: path.to_string(),
            expected: "object".to_string(),
            actual: Self::type_name(value),
        })
    }

    /// Reports every missing top-level field at once.
    fn require_all(
        &self,
        obj: &Map<String, Value>,
        fields: &[&str],
    ) -> Result<(), SchemaValidationError> {
        let errors: Vec<_> = fields
            .iter()
            .filter(|f| !obj.contains_key(**f))
            .map(|f| SchemaValidationError::MissingRequired {
                field: f.to_string(),
            })
            .collect();
        match Self::collect_errors(errors) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn require_field(
        &self,
        obj: &Map<String, Value>,
        field: &str,
        parent: &str,
    ) -> Result<(), SchemaValidationError> {
        if obj.contains_key(field) {
            return Ok(());
        }
        Err(SchemaValidationError::MissingRequired {
            field: Self::path(parent, field),
        })
    }

    fn require_string_field(
        &self,
        obj: &Map<String, Value>,
        field: &str,
        parent: &str,
    ) -> Result<(), SchemaValidationError> {
        self.require_field(obj, field, parent)?;
        if let Some(val) = obj.get(field) {
            if !val.is_string() {
                return Err(SchemaValidationError::InvalidType {
                    field: Self::path(parent, field),
                    expected: "string".to_string(),
                    actual: Self::type_name(val),
                });
            }
        }
        Ok(())
    }

    fn require_non_empty_string(
        &self,
        obj: &Map<String, Value>,
        field: &str,
        parent: &str,
    ) -> Result<(), SchemaValidationError> {
        self.require_string_field(obj, field, parent)?;
        if let Some(val) = obj.get(field).and_then(|v| v.as_str()) {
            if val.trim().is_empty() {
                return Err(SchemaValidationError::Generic {
                    message: format!("{} must not be empty", Self::path(parent, field)),
                });
            }
        }
        Ok(())
    }

    fn require_array<'a>(
        &self,
        obj: &'a Map<String, Value>,
        field: &str,
        parent: &str,
        min_items: usize,
    ) -> Result<&'a Vec<Value>, SchemaValidationError> {
        self.require_field(obj, field, parent)?;
        let value = &obj[field];
        let arr = value.as_array().ok_or_else(|| SchemaValidationError::InvalidType {
            field: Self::path(parent, field),
            expected: "array".to_string(),
            actual: Self::type_name(value),
        })?;
        if arr.len() < min_items {
            return Err(SchemaValidationError::ArrayTooShort {
                field: Self::path(parent, field),
                min: min_items,
                actual: arr.len(),
            });
        }
        Ok(arr)
    }

    fn validate_enum(
        &self,
        value: &Value,
        valid_values: &[&str],
        path: &str,
    ) -> Result<(), SchemaValidationError> {
        let Some(s) = value.as_str() else {
            return Err(SchemaValidationError::InvalidType {
                field: path.to_string(),
                expected: "string".to_string(),
                actual: Self::type_name(value),
            });
        };
        if !valid_values.contains(&s) {
            return Err(SchemaValidationError::NotInEnum {
                field: path.to_string(),
                allowed: valid_values.iter().map(|v| v.to_string()).collect(),
                actual: s.to_string(),
            });
        }
        Ok(())
    }

    fn path(parent: &str, field: &str) -> String {
        if parent == "root" {
            field.to_string()
        } else {
            format!("{}.{}", parent, field)
        }
    }

    fn type_name(value: &Value) -> String {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
        .to_string()
    }

    fn collect_errors(mut errors: Vec<SchemaValidationError>) -> Option<SchemaValidationError> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(SchemaValidationError::Multiple(errors)),
        }
    }
}

impl FlowOutputValidator for JsonSchemaValidator {
    fn validate(&self, flow: FlowKind, output: &Value) -> Result<(), SchemaValidationError> {
        match flow {
            FlowKind::YieldPrediction => self.validate_yield_prediction(output),
            FlowKind::ApplicationRecommendation => self.validate_recommendations(output),
            FlowKind::PlantDiagnosis => self.validate_plant_diagnosis(output),
            FlowKind::ReportSummary => self.validate_report_summary(output),
        }
    }

    fn schema_for(&self, flow: FlowKind) -> &Value {
        match flow {
            FlowKind::YieldPrediction => &YIELD_PREDICTION_SCHEMA,
            FlowKind::ApplicationRecommendation => &APPLICATION_RECOMMENDATION_SCHEMA,
            FlowKind::PlantDiagnosis => &PLANT_DIAGNOSIS_SCHEMA,
            FlowKind::ReportSummary => &REPORT_SUMMARY_SCHEMA,
        }
    }
}
