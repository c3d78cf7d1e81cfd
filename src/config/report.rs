//! Report binary configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Settings of the profitability report binary
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReportConfig {
    /// Farm records JSON snapshot
    pub snapshot_path: Option<PathBuf>,

    #[serde(default)]
    pub environment: Environment,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,
}

/// Application environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_deserialization() {
        let json = r#"{
            "snapshot_path": "/tmp/farm.json",
            "environment": "production",
            "json_logs": true
        }"#;

        let config: ReportConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.snapshot_path, Some(PathBuf::from("/tmp/farm.json")));
        assert_eq!(config.environment, Environment::Production);
        assert!(config.json_logs);
    }

    #[test]
    fn test_report_defaults() {
        let config: ReportConfig = serde_json::from_str("{}").unwrap();
        assert!(config.snapshot_path.is_none());
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.json_logs);
    }
}
