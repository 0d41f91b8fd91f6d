//! Backtest command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use flowta_backtest::{Backtest, BacktestConfig, ReportOptions, ReportRegistry};
use flowta_config::{AppConfig, BacktestSettings};
use flowta_data::FileSystemRepository;
use tracing::info;

use crate::cli::BacktestArgs;

/// Apply command line overrides to the configured settings.
fn merge(args: BacktestArgs, mut settings: BacktestSettings) -> BacktestSettings {
    if let Some(repository) = args.repository {
        settings.repository = repository.to_string_lossy().into_owned();
    }
    if !args.assets.is_empty() {
        settings.assets = args.assets;
    }
    if !args.strategies.is_empty() {
        settings.strategies = args.strategies;
    }
    if let Some(workers) = args.workers {
        settings.workers = workers;
    }
    if let Some(last_days) = args.last_days {
        settings.last_days = last_days;
    }
    if let Some(report) = args.report {
        settings.report = report;
    }
    if let Some(output) = args.output {
        settings.output_dir = output.to_string_lossy().into_owned();
    }
    settings
}

pub async fn run(args: BacktestArgs, config: AppConfig) -> Result<()> {
    let config = AppConfig {
        backtest: merge(args, config.backtest),
        ..config
    };
    config.validate()?;
    let settings = config.backtest;

    let repository = FileSystemRepository::new(&settings.repository)
        .with_context(|| format!("Failed to open repository {}", settings.repository))?;

    let options = ReportOptions {
        output_dir: PathBuf::from(&settings.output_dir),
    };
    let mut report = ReportRegistry::new().build(&settings.report, &options)?;

    info!(
        repository = %settings.repository,
        report = %settings.report,
        "Starting backtest"
    );

    let backtest = Backtest::new(
        Arc::new(repository),
        BacktestConfig {
            workers: settings.workers,
            last_days: settings.last_days,
            assets: settings.assets,
            strategies: settings.strategies,
        },
    );
    let summary = backtest.run(report.as_mut()).await?;

    println!("{}", summary.summary());

    if summary.processed.is_empty() {
        anyhow::bail!("No asset could be backtested");
    }

    Ok(())
}
