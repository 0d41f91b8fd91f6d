//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, BacktestSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File, FileFormat};
use std::path::Path;

/// Prefix of environment variables overriding the file,
/// e.g. `FLOWTA__BACKTEST__WORKERS=8`.
pub const ENV_PREFIX: &str = "FLOWTA";

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    load(path, true)
}

/// Load configuration like [`load_config`], falling back to defaults when
/// the file does not exist.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, ConfigError> {
    load(path, false)
}

fn load(path: &Path, required: bool) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(required),
        )
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("backtest.assets")
                .with_list_parse_key("backtest.strategies")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[logging]
level = "debug"
format = "json"

[backtest]
repository = "/srv/assets"
report = "json"
workers = 2
last_days = 30
assets = ["AAPL", "MSFT"]
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json());
        assert_eq!(config.backtest.repository, "/srv/assets");
        assert_eq!(config.backtest.workers, 2);
        assert_eq!(config.backtest.last_days, 30);
        assert_eq!(config.backtest.assets, vec!["AAPL", "MSFT"]);
        assert_eq!(config.backtest.output_dir, "output");
        assert!(config.backtest.strategies.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        assert!(load_config(&path).is_err());

        let config = load_config_or_default(&path).unwrap();
        assert_eq!(config.backtest.report, "csv");
    }

    #[test]
    fn test_environment_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[app]\nname = \"flowta\"\nenvironment = \"development\"").unwrap();

        std::env::set_var("FLOWTA__APP__ENVIRONMENT", "production");
        let config = load_config(file.path());
        std::env::remove_var("FLOWTA__APP__ENVIRONMENT");

        assert_eq!(config.unwrap().app.environment, "production");
    }
}
