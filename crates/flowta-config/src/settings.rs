//! Configuration structures.

use flowta_core::error::FlowError;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backtest: BacktestSettings,
}

impl AppConfig {
    /// Check settings that deserialize fine but cannot run.
    pub fn validate(&self) -> Result<(), FlowError> {
        if self.backtest.workers == 0 {
            return Err(FlowError::Validation(
                "backtest.workers must be at least 1".into(),
            ));
        }
        if self.backtest.report.trim().is_empty() {
            return Err(FlowError::Validation(
                "backtest.report must name a report".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(FlowError::Validation(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, FlowError> {
        toml::to_string_pretty(self).map_err(|e| FlowError::Config(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "flowta".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Whether logs are written as JSON.
    pub fn json(&self) -> bool {
        self.format == "json"
    }
}

/// Backtest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    /// Directory of the CSV asset repository
    pub repository: String,
    /// Directory reports write into
    pub output_dir: String,
    /// Registered report name
    pub report: String,
    pub workers: usize,
    /// Days of history before the last snapshot, 0 for all
    pub last_days: u32,
    /// Assets to backtest, empty for all
    pub assets: Vec<String>,
    /// Strategy registry keys, empty for all
    pub strategies: Vec<String>,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            repository: "data".to_string(),
            output_dir: "output".to_string(),
            report: "csv".to_string(),
            workers: 4,
            last_days: 365,
            assets: Vec::new(),
            strategies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backtest.last_days, 365);
        assert!(!config.logging.json());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = AppConfig::default();
        config.backtest.workers = 0;
        assert!(matches!(config.validate(), Err(FlowError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_report() {
        let mut config = AppConfig::default();
        config.backtest.report = "  ".to_string();
        assert!(matches!(config.validate(), Err(FlowError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = AppConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.backtest.report, "csv");
        assert_eq!(parsed.app.name, "flowta");
    }
}
