//! Flow Output Validator Port - Strict validation of model outputs.
//!
//! Every decision flow declares a JSON Schema for its output. Before a
//! model answer is deserialized it is checked against that schema; any
//! violation rejects the whole answer.

use serde_json::Value;
use thiserror::Error;

use crate::domain::advisor::FlowKind;

/// Port for validating model outputs against their flow's schema.
///
/// # Usage
///
/// ```rust,ignore
/// let validator: &dyn FlowOutputValidator = get_validator();
///
/// validator.validate(FlowKind::PlantDiagnosis, &output)?;
///
/// // Schema sent to the model alongside the request
/// let schema = validator.schema_for(FlowKind::YieldPrediction);
/// ```
pub trait FlowOutputValidator: Send + Sync {
    /// Validate output against the flow's schema.
    ///
    /// Returns `Ok(())` if valid, `Err` with every violation found if not.
    fn validate(&self, flow: FlowKind, output: &Value) -> Result<(), SchemaValidationError>;

    /// Get the JSON Schema for a flow's output.
    fn schema_for(&self, flow: FlowKind) -> &Value;
}

/// Errors that can occur during schema validation.
#[derive(Debug, Clone, Error)]
pub enum SchemaValidationError {
    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid type for field {field}: expected {expected}, got {actual}")]
    InvalidType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Array too short for field {field}: minimum {min}, got {actual}")]
    ArrayTooShort {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("Value out of range for field {field}: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Invalid value for field {field}: expected one of {allowed:?}, got '{actual}'")]
    NotInEnum {
        field: String,
        allowed: Vec<String>,
        actual: String,
    },

    #[error("Schema validation failed: {message}")]
    Generic { message: String },

    #[error("Validation errors: {0:?}")]
    Multiple(Vec<SchemaValidationError>),
}

impl SchemaValidationError {
    /// Short description suitable for logs and caller-facing errors.
    ///
    /// Multiple failures are reported by their first entry.
    pub fn summary(&self) -> String {
        match self {
            SchemaValidationError::Generic { message } if message.len() > 100 => {
                let cut = message
                    .char_indices()
                    .map(|(i, _)| i)
                    .take_while(|i| *i <= 97)
                    .last()
                    .unwrap_or(0);
                format!("Schema validation failed: {}...", &message[..cut])
            }
            SchemaValidationError::Multiple(errors) => errors
                .first()
                .map(|e| format!("{} (and {} more)", e.summary(), errors.len() - 1))
                .unwrap_or_else(|| "Schema validation failed".to_string()),
            other => other.to_string(),
        }
    }

    /// Get the count of validation errors.
    pub fn error_count(&self) -> usize {
        match self {
            SchemaValidationError::Multiple(errors) => errors.len(),
            _ => 1,
        }
    }
}

impl PartialEq for SchemaValidationError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by error message for testing purposes
        self.to_string() == other.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_displays_field_name() {
        let err = SchemaValidationError::MissingRequired {
            field: "prediction".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required field: prediction");
        assert_eq!(err.summary(), "Missing required field: prediction");
    }

    #[test]
    fn not_in_enum_lists_allowed_values() {
        let err = SchemaValidationError::NotInEnum {
            field: "confidence".to_string(),
            allowed: vec!["High".into(), "Medium".into(), "Low".into()],
            actual: "Certain".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("confidence"));
        assert!(msg.contains("\"High\""));
        assert!(msg.contains("'Certain'"));
    }

    #[test]
    fn array_too_short_shows_minimum() {
        let err = SchemaValidationError::ArrayTooShort {
            field: "recommendations".to_string(),
            min: 1,
            actual: 0,
        };
        assert_eq!(
            err.to_string(),
            "Array too short for field recommendations: minimum 1, got 0"
        );
    }

    #[test]
    fn multiple_summary_reports_first_and_count() {
        let err = SchemaValidationError::Multiple(vec![
            SchemaValidationError::MissingRequired {
                field: "first".to_string(),
            },
            SchemaValidationError::MissingRequired {
                field: "second".to_string(),
            },
        ]);
        assert_eq!(err.summary(), "Missing required field: first (and 1 more)");
        assert_eq!(err.error_count(), 2);
    }

    #[test]
    fn generic_summary_truncates_long_messages() {
        let err = SchemaValidationError::Generic {
            message: "x".repeat(200),
        };
        let summary = err.summary();
        assert!(summary.len() < 150);
        assert!(summary.ends_with("..."));
    }
}
