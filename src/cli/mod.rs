//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flowta")]
#[command(author, version, about = "Streaming technical analysis and strategy backtesting")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level, overrides the configuration
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Backtest strategies over the assets of a repository
    Backtest(BacktestArgs),
    /// List available strategies
    Strategies,
    /// Validate configuration
    ValidateConfig,
}

/// Every option overrides the `[backtest]` section of the configuration.
#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Directory of asset CSV files
    #[arg(short, long)]
    pub repository: Option<PathBuf>,

    /// Assets to backtest (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub assets: Vec<String>,

    /// Strategy keys to backtest (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub strategies: Vec<String>,

    /// Number of concurrent workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Days of history to backtest, 0 for all
    #[arg(long)]
    pub last_days: Option<u32>,

    /// Report to generate (csv, data, json)
    #[arg(long)]
    pub report: Option<String>,

    /// Output directory for report files
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
