//! Backtest orchestrator and report sinks.

mod csv_report;
mod engine;
mod json_report;
mod registry;
mod report;
mod statistics;

pub use csv_report::{CsvReport, SUMMARY_FILE};
pub use engine::{backtest_asset, Backtest, BacktestConfig};
pub use json_report::{AssetResults, JsonDocument, JsonReport, REPORT_FILE};
pub use registry::{ReportBuilder, ReportOptions, ReportRegistry};
pub use report::DataReport;
pub use statistics::{BacktestSummary, StrategyStats};
