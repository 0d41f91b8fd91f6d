//! Backtest run statistics.

use std::collections::BTreeMap;
use std::time::Duration;

use flowta_core::types::StrategyResult;
use serde::{Deserialize, Serialize};

/// Aggregate figures of one strategy across all assets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyStats {
    /// Number of assets the strategy was evaluated on
    pub assets: usize,
    /// Number of assets where it had the best outcome
    pub wins: usize,
    /// Sum of final outcomes
    pub total_outcome: f64,
    /// Sum of transactions
    pub transactions: usize,
}

impl StrategyStats {
    /// Mean final outcome over the evaluated assets.
    pub fn average_outcome(&self) -> f64 {
        if self.assets == 0 {
            0.0
        } else {
            self.total_outcome / self.assets as f64
        }
    }
}

/// Summary of a backtest run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BacktestSummary {
    /// Assets whose results were reported
    pub processed: Vec<String>,
    /// Assets skipped because of retrieval or report errors
    pub skipped: Vec<String>,
    /// Best strategy result per reported asset
    pub best: Vec<StrategyResult>,
    /// Figures per strategy name
    pub strategies: BTreeMap<String, StrategyStats>,
    /// Wall clock duration of the run
    pub elapsed: Duration,
}

impl BacktestSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the results of one asset, sorted from best to worst.
    pub fn record_asset(&mut self, asset: &str, results: &[StrategyResult]) {
        self.processed.push(asset.to_string());

        if let Some(best) = results.first() {
            self.best.push(best.clone());
        }

        for (rank, result) in results.iter().enumerate() {
            let stats = self.strategies.entry(result.strategy.clone()).or_default();
            stats.assets += 1;
            stats.total_outcome += result.outcome;
            stats.transactions += result.transactions;
            if rank == 0 {
                stats.wins += 1;
            }
        }
    }

    /// Record an asset that was skipped.
    pub fn record_skip(&mut self, asset: &str) {
        self.skipped.push(asset.to_string());
    }

    /// Best result of an asset.
    pub fn best_for(&self, asset: &str) -> Option<&StrategyResult> {
        self.best.iter().find(|r| r.asset == asset)
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                     BACKTEST SUMMARY                       \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("RUN\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Assets Processed:    {}\n", self.processed.len()));
        s.push_str(&format!("  Assets Skipped:      {}\n", self.skipped.len()));
        s.push_str(&format!(
            "  Elapsed:             {:.2}s\n",
            self.elapsed.as_secs_f64()
        ));
        s.push('\n');

        s.push_str("BEST STRATEGY PER ASSET\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        let mut best: Vec<&StrategyResult> = self.best.iter().collect();
        best.sort_by(|a, b| a.asset.cmp(&b.asset));
        for result in best {
            s.push_str(&format!(
                "  {:<10} {:<32} {:>9.2}%  {}\n",
                result.asset,
                result.strategy,
                result.outcome * 100.0,
                result.action
            ));
        }
        s.push('\n');

        s.push_str("STRATEGIES\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        for (name, stats) in &self.strategies {
            s.push_str(&format!(
                "  {:<32} avg {:>8.2}%  wins {:>4}  trades {:>5}\n",
                name,
                stats.average_outcome() * 100.0,
                stats.wins,
                stats.transactions
            ));
        }
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }
}
