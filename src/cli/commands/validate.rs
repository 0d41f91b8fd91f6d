//! Validate configuration command.

use anyhow::Result;
use flowta_backtest::ReportRegistry;
use flowta_config::load_config;
use flowta_strategies::StrategyRegistry;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    config.validate()?;

    if !ReportRegistry::new().exists(&config.backtest.report) {
        anyhow::bail!("Unknown report: {}", config.backtest.report);
    }
    StrategyRegistry::new().resolve(&config.backtest.strategies)?;

    println!("Configuration is valid!");
    println!();
    print!("{}", config.to_toml()?);

    Ok(())
}
