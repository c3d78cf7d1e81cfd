//! Tool definition - schema and metadata for a tool the model may call.

use serde::{Deserialize, Serialize};

/// Definition of a tool that can be offered to the model.
///
/// Contains the name, the description the model sees, and the JSON Schema
/// of the parameters the model must supply.
///
/// # Examples
///
/// ```ignore
/// use berry_sherpa::domain::tools::ToolDefinition;
///
/// let definition = ToolDefinition::new(
///     "get_weather_forecast",
///     "Get the daily weather forecast for a location",
///     serde_json::json!({
///         "type": "object",
///         "required": ["latitude", "longitude"],
///         "properties": {
///             "latitude": { "type": "number" },
///             "longitude": { "type": "number" }
///         }
///     }),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "get_weather_forecast")
    name: String,

    /// Description shown to the model
    description: String,

    /// JSON Schema for the parameters
    parameters_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Creates a new tool definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters_schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters_schema(&self) -> &serde_json::Value {
        &self.parameters_schema
    }

    /// Names of the parameters the schema marks as required.
    pub fn required_parameters(&self) -> Vec<&str> {
        self.parameters_schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|items| items.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default()
    }

    /// Converts to Anthropic tool format.
    pub fn to_anthropic_format(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "input_schema": self.parameters_schema
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["latitude", "longitude"],
            "properties": {
                "latitude": { "type": "number" },
                "longitude": { "type": "number" }
            }
        })
    }

    #[test]
    fn new_creates_definition() {
        let def = ToolDefinition::new("get_weather_forecast", "Forecast", sample_params_schema());

        assert_eq!(def.name(), "get_weather_forecast");
        assert_eq!(def.description(), "Forecast");
        assert_eq!(def.required_parameters(), vec!["latitude", "longitude"]);
    }

    #[test]
    fn required_parameters_empty_without_required_list() {
        let def = ToolDefinition::new("noop", "Nothing", serde_json::json!({"type": "object"}));
        assert!(def.required_parameters().is_empty());
    }

    #[test]
    fn to_anthropic_format_has_correct_structure() {
        let def = ToolDefinition::new("get_weather_forecast", "Forecast", sample_params_schema());

        let anthropic = def.to_anthropic_format();

        assert_eq!(anthropic["name"], "get_weather_forecast");
        assert_eq!(anthropic["description"], "Forecast");
        assert!(anthropic["input_schema"].is_object());
        assert_eq!(anthropic["input_schema"]["required"][0], "latitude");
    }
}
