//! Report trait definitions.

use crate::error::ReportError;
use crate::types::StrategyResult;

/// Sink for backtest results.
///
/// A backtest calls `begin` once, then for every asset `asset_begin`,
/// `write` per strategy result (best outcome first) and `asset_end`, and
/// finally `end`. All calls come from a single task.
pub trait Report: Send {
    /// Called once before any asset is reported.
    fn begin(&mut self, assets: &[String], strategies: &[String]) -> Result<(), ReportError>;

    /// Called before the results of an asset are written.
    fn asset_begin(&mut self, asset: &str, strategies: &[String]) -> Result<(), ReportError>;

    /// Record one strategy result of the current asset.
    fn write(&mut self, result: &StrategyResult) -> Result<(), ReportError>;

    /// Called after all results of an asset are written.
    fn asset_end(&mut self, asset: &str) -> Result<(), ReportError>;

    /// Called once after the last asset.
    fn end(&mut self) -> Result<(), ReportError>;
}
