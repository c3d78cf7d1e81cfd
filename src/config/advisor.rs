//! Decision flow configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Record window and tool-loop limits of the decision flows
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorConfig {
    /// Days of records included before the reference day
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Entries kept per record kind
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Tool-use rounds allowed per invocation
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: u32,
}

impl AdvisorConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_days == 0 {
            return Err(ValidationError::MustBePositive("ADVISOR_WINDOW_DAYS"));
        }
        if self.max_entries == 0 {
            return Err(ValidationError::MustBePositive("ADVISOR_MAX_ENTRIES"));
        }
        if self.max_tool_rounds == 0 {
            return Err(ValidationError::MustBePositive("ADVISOR_MAX_TOOL_ROUNDS"));
        }
        Ok(())
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            max_entries: default_max_entries(),
            max_tool_rounds: default_max_tool_rounds(),
        }
    }
}

fn default_window_days() -> u32 {
    30
}

fn default_max_entries() -> usize {
    50
}

fn default_max_tool_rounds() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisor_defaults() {
        let config = AdvisorConfig::default();
        assert_eq!(config.window_days, 30);
        assert_eq!(config.max_entries, 50);
        assert_eq!(config.max_tool_rounds, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = AdvisorConfig {
            max_tool_rounds: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MustBePositive("ADVISOR_MAX_TOOL_ROUNDS"))
        ));
    }
}
