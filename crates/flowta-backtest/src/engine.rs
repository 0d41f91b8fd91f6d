//! Backtesting engine.

use std::sync::Arc;
use std::time::Instant;

use chrono::Duration;
use flowta_core::error::{DataError, FlowError};
use flowta_core::traits::{Report, Repository, Strategy};
use flowta_core::types::{sort_by_outcome, Snapshot, StrategyResult};
use flowta_helper::{duplicate, from_vec, last, operate4, since, to_vec, Sequence};
use flowta_strategies::{
    compute_with_outcome, count_transactions, denormalize_actions, StrategyRegistry,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::statistics::BacktestSummary;

/// Backtest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Number of assets backtested concurrently
    pub workers: usize,
    /// Days of history before the last snapshot to backtest, 0 for all
    pub last_days: u32,
    /// Assets to backtest, empty for every asset in the repository
    pub assets: Vec<String>,
    /// Registry keys of the strategies, empty for all registered ones
    pub strategies: Vec<String>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            last_days: 365,
            assets: Vec::new(),
            strategies: Vec::new(),
        }
    }
}

/// What a worker hands to the aggregator for one asset.
enum AssetOutcome {
    Done {
        asset: String,
        results: Vec<StrategyResult>,
    },
    Skipped(String),
}

/// Backtesting engine.
///
/// Runs every strategy over the history of every asset on a pool of
/// workers and feeds the results to a [`Report`].
pub struct Backtest {
    repository: Arc<dyn Repository>,
    config: BacktestConfig,
    strategies: Option<Vec<Arc<dyn Strategy>>>,
}

impl Backtest {
    /// Create a new backtest over `repository`.
    pub fn new(repository: Arc<dyn Repository>, config: BacktestConfig) -> Self {
        Self {
            repository,
            config,
            strategies: None,
        }
    }

    /// Use the given strategy instances instead of registry keys.
    pub fn with_strategies(mut self, strategies: Vec<Arc<dyn Strategy>>) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    fn resolve_strategies(&self) -> Result<Vec<Arc<dyn Strategy>>, FlowError> {
        if let Some(strategies) = &self.strategies {
            return Ok(strategies.clone());
        }

        let registry = StrategyRegistry::new();
        if self.config.strategies.is_empty() {
            Ok(registry.all())
        } else {
            Ok(registry.resolve(&self.config.strategies)?)
        }
    }

    async fn resolve_assets(&self) -> Result<Vec<String>, FlowError> {
        if self.config.assets.is_empty() {
            Ok(self.repository.assets().await?)
        } else {
            Ok(self.config.assets.clone())
        }
    }

    /// Run the backtest.
    ///
    /// Assets that cannot be loaded or reported are logged and skipped.
    /// Failures to begin or end the report abort the run.
    pub async fn run(&self, report: &mut dyn Report) -> Result<BacktestSummary, FlowError> {
        let started = Instant::now();

        if self.config.workers == 0 {
            return Err(FlowError::Config(
                "Backtest needs at least one worker".into(),
            ));
        }

        let assets = self.resolve_assets().await?;
        let strategies = self.resolve_strategies()?;
        let names: Vec<String> = strategies.iter().map(|s| s.name().to_string()).collect();

        info!(
            repository = self.repository.name(),
            assets = assets.len(),
            strategies = names.len(),
            workers = self.config.workers,
            "Starting backtest"
        );

        report.begin(&assets, &names)?;

        let queue = Arc::new(Mutex::new(from_vec(assets)));
        let strategies = Arc::new(strategies);
        let (results_tx, mut results_rx) = mpsc::channel(self.config.workers);

        let mut workers = JoinSet::new();
        for id in 0..self.config.workers {
            workers.spawn(worker(
                id,
                Arc::clone(&queue),
                Arc::clone(&self.repository),
                Arc::clone(&strategies),
                self.config.last_days,
                results_tx.clone(),
            ));
        }
        // The channel closes once every worker is done.
        drop(results_tx);

        let mut summary = BacktestSummary::new();
        while let Some(outcome) = results_rx.recv().await {
            match outcome {
                AssetOutcome::Done { asset, mut results } => {
                    sort_by_outcome(&mut results);
                    match write_asset(report, &asset, &names, &results) {
                        Ok(()) => summary.record_asset(&asset, &results),
                        Err(e) => {
                            error!(asset = %asset, error = %e, "Failed to report asset");
                            summary.record_skip(&asset);
                        }
                    }
                }
                AssetOutcome::Skipped(asset) => summary.record_skip(&asset),
            }
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Backtest worker failed");
            }
        }

        report.end()?;

        summary.elapsed = started.elapsed();
        info!(
            processed = summary.processed.len(),
            skipped = summary.skipped.len(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Backtest complete"
        );

        Ok(summary)
    }
}

fn write_asset(
    report: &mut dyn Report,
    asset: &str,
    strategies: &[String],
    results: &[StrategyResult],
) -> Result<(), FlowError> {
    report.asset_begin(asset, strategies)?;
    for result in results {
        report.write(result)?;
    }
    report.asset_end(asset)?;
    Ok(())
}

async fn worker(
    id: usize,
    queue: Arc<Mutex<Sequence<String>>>,
    repository: Arc<dyn Repository>,
    strategies: Arc<Vec<Arc<dyn Strategy>>>,
    last_days: u32,
    results: mpsc::Sender<AssetOutcome>,
) {
    loop {
        let next = queue.lock().await.recv().await;
        let Some(asset) = next else { break };

        debug!(worker = id, asset = %asset, "Backtesting asset");

        let outcome = match load_history(repository.as_ref(), &asset, last_days).await {
            Ok(snapshots) if snapshots.is_empty() => {
                warn!(asset = %asset, error = %DataError::NoDataAvailable, "Skipping asset");
                AssetOutcome::Skipped(asset)
            }
            Ok(snapshots) => {
                let results = backtest_asset(&asset, from_vec(snapshots), &strategies).await;
                AssetOutcome::Done { asset, results }
            }
            Err(e) => {
                warn!(asset = %asset, error = %e, "Skipping asset");
                AssetOutcome::Skipped(asset)
            }
        };

        if results.send(outcome).await.is_err() {
            break;
        }
    }

    debug!(worker = id, "Worker finished");
}

/// Load the history of an asset, limited to `last_days` before its last
/// snapshot. Zero loads the full history.
pub(crate) async fn load_history(
    repository: &dyn Repository,
    asset: &str,
    last_days: u32,
) -> Result<Vec<Snapshot>, DataError> {
    if last_days == 0 {
        return repository.get(asset).await;
    }

    let last = repository.last_date(asset).await?;
    repository
        .get_since(asset, last - Duration::days(i64::from(last_days)))
        .await
}

/// Evaluate every strategy over one asset's history.
///
/// The history is duplicated once per strategy and each fork is evaluated
/// on its own task, so all strategies consume the history in lock step.
/// Results keep the order of `strategies`.
pub async fn backtest_asset(
    asset: &str,
    history: Sequence<Snapshot>,
    strategies: &[Arc<dyn Strategy>],
) -> Vec<StrategyResult> {
    let forks = duplicate(history, strategies.len());

    let mut runs = JoinSet::new();
    for (index, (strategy, fork)) in strategies.iter().zip(forks).enumerate() {
        let strategy = Arc::clone(strategy);
        let asset = asset.to_string();
        runs.spawn(async move { (index, evaluate(strategy.as_ref(), &asset, fork).await) });
    }

    let mut evaluated = Vec::with_capacity(strategies.len());
    while let Some(joined) = runs.join_next().await {
        match joined {
            Ok(run) => evaluated.push(run),
            Err(e) => error!(asset, error = %e, "Strategy task failed"),
        }
    }
    evaluated.sort_by_key(|(index, _)| *index);

    let mut results = Vec::with_capacity(evaluated.len());
    for (index, result) in evaluated {
        match result {
            Some(result) => results.push(result),
            None => warn!(
                asset,
                strategy = strategies[index].name(),
                "Strategy produced no actions"
            ),
        }
    }

    results
}

/// Reduce a strategy run to its final position, how long it has been held,
/// the final outcome and the number of transactions.
async fn evaluate(
    strategy: &dyn Strategy,
    asset: &str,
    snapshots: Sequence<Snapshot>,
) -> Option<StrategyResult> {
    let (actions, outcomes) = compute_with_outcome(strategy, snapshots);

    let mut forks = duplicate(actions, 2);
    let (Some(for_transactions), Some(for_positions)) = (forks.pop(), forks.pop()) else {
        return None;
    };

    let mut positions = duplicate(denormalize_actions(for_positions), 2);
    let (Some(for_since), Some(positions)) = (positions.pop(), positions.pop()) else {
        return None;
    };

    let rows = operate4(
        positions,
        since(for_since),
        outcomes,
        count_transactions(for_transactions),
        |action, since, outcome, transactions| (action, since, outcome, transactions),
    );

    let (action, since, outcome, transactions) = to_vec(last(rows, 1)).await.pop()?;

    Some(StrategyResult {
        asset: asset.to_string(),
        strategy: strategy.name().to_string(),
        action,
        since,
        outcome,
        transactions,
    })
}
