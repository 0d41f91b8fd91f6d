//! In-memory backtest report.

use std::collections::BTreeMap;

use flowta_core::error::ReportError;
use flowta_core::traits::Report;
use flowta_core::types::StrategyResult;

/// Report that keeps every result in memory.
#[derive(Debug, Default)]
pub struct DataReport {
    strategies: Vec<String>,
    rows: Vec<StrategyResult>,
    best: BTreeMap<String, StrategyResult>,
    started: bool,
}

impl DataReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every result in the order it was written.
    pub fn rows(&self) -> &[StrategyResult] {
        &self.rows
    }

    /// Results of one asset, best outcome first.
    pub fn asset_rows(&self, asset: &str) -> Vec<&StrategyResult> {
        self.rows.iter().filter(|r| r.asset == asset).collect()
    }

    /// Best result per asset, ordered by asset name.
    pub fn best(&self) -> impl Iterator<Item = &StrategyResult> {
        self.best.values()
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                     BACKTEST REPORT                        \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str(&format!("  Strategies:          {}\n", self.strategies.len()));
        s.push_str(&format!("  Assets:              {}\n", self.best.len()));
        s.push('\n');

        for asset in self.best.keys() {
            s.push_str(&format!("{}\n", asset));
            s.push_str("───────────────────────────────────────────────────────────\n");
            for row in self.asset_rows(asset) {
                s.push_str(&format!(
                    "  {:<32} {:<4} {:>5}  {:>9.2}%  {:>4} trades\n",
                    row.strategy,
                    row.action.annotation(),
                    row.since,
                    row.outcome * 100.0,
                    row.transactions
                ));
            }
            s.push('\n');
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    fn ensure_started(&self) -> Result<(), ReportError> {
        if self.started {
            Ok(())
        } else {
            Err(ReportError::NotStarted("data".into()))
        }
    }
}

impl Report for DataReport {
    fn begin(&mut self, _assets: &[String], strategies: &[String]) -> Result<(), ReportError> {
        self.strategies = strategies.to_vec();
        self.rows.clear();
        self.best.clear();
        self.started = true;
        Ok(())
    }

    fn asset_begin(&mut self, _asset: &str, _strategies: &[String]) -> Result<(), ReportError> {
        self.ensure_started()
    }

    fn write(&mut self, result: &StrategyResult) -> Result<(), ReportError> {
        self.ensure_started()?;

        let better = self
            .best
            .get(&result.asset)
            .map_or(true, |best| result.outcome > best.outcome);
        if better {
            self.best.insert(result.asset.clone(), result.clone());
        }

        self.rows.push(result.clone());
        Ok(())
    }

    fn asset_end(&mut self, _asset: &str) -> Result<(), ReportError> {
        self.ensure_started()
    }

    fn end(&mut self) -> Result<(), ReportError> {
        self.ensure_started()?;
        self.started = false;
        Ok(())
    }
}
