//! JSON backtest report.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use flowta_core::error::ReportError;
use flowta_core::traits::Report;
use flowta_core::types::StrategyResult;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Name of the report file.
pub const REPORT_FILE: &str = "report.json";

/// Results of one asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetResults {
    pub asset: String,
    pub results: Vec<StrategyResult>,
}

/// Document written by [`JsonReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDocument {
    pub generated_at: DateTime<Utc>,
    pub strategies: Vec<String>,
    pub assets: Vec<AssetResults>,
}

/// Report collecting every result into a single pretty printed JSON file.
pub struct JsonReport {
    output_dir: PathBuf,
    document: Option<JsonDocument>,
}

impl JsonReport {
    /// Create a report writing `report.json` into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            document: None,
        }
    }

    fn document(&mut self) -> Result<&mut JsonDocument, ReportError> {
        self.document
            .as_mut()
            .ok_or_else(|| ReportError::NotStarted("json".into()))
    }
}

impl Report for JsonReport {
    fn begin(&mut self, _assets: &[String], strategies: &[String]) -> Result<(), ReportError> {
        std::fs::create_dir_all(&self.output_dir)?;
        self.document = Some(JsonDocument {
            generated_at: Utc::now(),
            strategies: strategies.to_vec(),
            assets: Vec::new(),
        });
        Ok(())
    }

    fn asset_begin(&mut self, asset: &str, _strategies: &[String]) -> Result<(), ReportError> {
        self.document()?.assets.push(AssetResults {
            asset: asset.to_string(),
            results: Vec::new(),
        });
        Ok(())
    }

    fn write(&mut self, result: &StrategyResult) -> Result<(), ReportError> {
        let current = self
            .document()?
            .assets
            .last_mut()
            .ok_or_else(|| ReportError::NotStarted(result.asset.clone()))?;
        current.results.push(result.clone());
        Ok(())
    }

    fn asset_end(&mut self, _asset: &str) -> Result<(), ReportError> {
        self.document().map(|_| ())
    }

    fn end(&mut self) -> Result<(), ReportError> {
        let document = self
            .document
            .take()
            .ok_or_else(|| ReportError::NotStarted("json".into()))?;

        let path = self.output_dir.join(REPORT_FILE);
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, &document)
            .map_err(|e| ReportError::Serialization(e.to_string()))?;

        info!(path = %path.display(), assets = document.assets.len(), "JSON report written");
        Ok(())
    }
}
