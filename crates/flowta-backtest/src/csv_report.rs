//! CSV backtest report.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::Writer;
use flowta_core::error::ReportError;
use flowta_core::traits::Report;
use flowta_core::types::StrategyResult;
use flowta_helper::close_and_log_error;
use serde::Serialize;
use tracing::info;

/// Name of the file holding the best result of every asset.
pub const SUMMARY_FILE: &str = "summary.csv";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct AssetRow<'a> {
    strategy: &'a str,
    action: String,
    since: usize,
    outcome: f64,
    transactions: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SummaryRow<'a> {
    asset: &'a str,
    strategy: &'a str,
    action: String,
    since: usize,
    outcome: f64,
    transactions: usize,
}

/// Report writing one CSV file per asset plus a summary file.
pub struct CsvReport {
    output_dir: PathBuf,
    summary: Option<Writer<File>>,
    asset: Option<AssetWriter>,
}

struct AssetWriter {
    name: String,
    writer: Writer<File>,
    best_written: bool,
}

impl CsvReport {
    /// Create a report writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            summary: None,
            asset: None,
        }
    }

    /// Get the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn asset_path(&self, asset: &str) -> PathBuf {
        self.output_dir.join(format!("{asset}.csv"))
    }
}

fn flush(mut writer: Writer<File>) -> Result<(), ReportError> {
    writer.flush()?;
    Ok(())
}

fn csv_error(e: csv::Error) -> ReportError {
    ReportError::Io(io::Error::from(e))
}

impl Report for CsvReport {
    fn begin(&mut self, _assets: &[String], _strategies: &[String]) -> Result<(), ReportError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let writer = Writer::from_path(self.output_dir.join(SUMMARY_FILE)).map_err(csv_error)?;
        self.summary = Some(writer);
        Ok(())
    }

    fn asset_begin(&mut self, asset: &str, _strategies: &[String]) -> Result<(), ReportError> {
        if self.summary.is_none() {
            return Err(ReportError::NotStarted("csv".into()));
        }

        // An asset abandoned after a failed write is closed here.
        if let Some(previous) = self.asset.take() {
            close_and_log_error(&previous.name, flush(previous.writer));
        }

        let writer = Writer::from_path(self.asset_path(asset)).map_err(csv_error)?;
        self.asset = Some(AssetWriter {
            name: asset.to_string(),
            writer,
            best_written: false,
        });
        Ok(())
    }

    fn write(&mut self, result: &StrategyResult) -> Result<(), ReportError> {
        let (Some(summary), Some(asset)) = (self.summary.as_mut(), self.asset.as_mut()) else {
            return Err(ReportError::NotStarted("csv".into()));
        };

        asset
            .writer
            .serialize(AssetRow {
                strategy: &result.strategy,
                action: result.action.to_string(),
                since: result.since,
                outcome: result.outcome,
                transactions: result.transactions,
            })
            .map_err(csv_error)?;

        // Results arrive best first.
        if !asset.best_written {
            summary
                .serialize(SummaryRow {
                    asset: &result.asset,
                    strategy: &result.strategy,
                    action: result.action.to_string(),
                    since: result.since,
                    outcome: result.outcome,
                    transactions: result.transactions,
                })
                .map_err(csv_error)?;
            asset.best_written = true;
        }

        Ok(())
    }

    fn asset_end(&mut self, asset: &str) -> Result<(), ReportError> {
        let writer = self
            .asset
            .take()
            .ok_or_else(|| ReportError::NotStarted(asset.to_string()))?;
        flush(writer.writer)
    }

    fn end(&mut self) -> Result<(), ReportError> {
        if let Some(previous) = self.asset.take() {
            close_and_log_error(&previous.name, flush(previous.writer));
        }

        let summary = self
            .summary
            .take()
            .ok_or_else(|| ReportError::NotStarted("csv".into()))?;
        flush(summary)?;

        info!(output = %self.output_dir.display(), "CSV report written");
        Ok(())
    }
}
