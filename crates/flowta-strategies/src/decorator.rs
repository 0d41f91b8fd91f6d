//! Strategies that alter the actions of a single inner strategy.

use std::sync::Arc;

use flowta_core::error::StrategyError;
use flowta_core::traits::Strategy;
use flowta_core::types::{Action, Snapshot};
use flowta_helper::{closed, duplicate, map, operate, Sequence};

/// Run `inner` over one fork of the snapshots and pair every action with
/// the snapshot it was computed for.
fn with_snapshots<F>(inner: &dyn Strategy, snapshots: Sequence<Snapshot>, f: F) -> Sequence<Action>
where
    F: FnMut(Snapshot, Action) -> Action + Send + 'static,
{
    let mut forks = duplicate(snapshots, 2);
    let current = forks.pop().unwrap_or_else(closed);
    let actions = inner.compute(forks.pop().unwrap_or_else(closed));
    operate(current, actions, f)
}

/// Buys when the inner strategy sells and sells when it buys.
pub struct InverseStrategy {
    inner: Arc<dyn Strategy>,
    name: String,
}

impl InverseStrategy {
    pub fn new(inner: Arc<dyn Strategy>) -> Self {
        let name = format!("Inverse({})", inner.name());
        Self { inner, name }
    }
}

impl Strategy for InverseStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        map(self.inner.compute(snapshots), Action::inverse)
    }
}

/// Never sells below the price the position was bought at.
///
/// Buy signals while already holding and sell signals at a loss become
/// Hold.
pub struct NoLossStrategy {
    inner: Arc<dyn Strategy>,
    name: String,
}

impl NoLossStrategy {
    pub fn new(inner: Arc<dyn Strategy>) -> Self {
        let name = format!("NoLoss({})", inner.name());
        Self { inner, name }
    }
}

impl Strategy for NoLossStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Suppresses sell signals below the buy price"
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        let mut bought_at: Option<f64> = None;

        with_snapshots(self.inner.as_ref(), snapshots, move |snapshot, action| {
            match (action, bought_at) {
                (Action::Buy, None) => {
                    bought_at = Some(snapshot.close);
                    Action::Buy
                }
                (Action::Sell, Some(price)) if snapshot.close >= price => {
                    bought_at = None;
                    Action::Sell
                }
                _ => Action::Hold,
            }
        })
    }
}

/// Sells as soon as the price falls a percentage below the buy price.
///
/// After a stop, buy signals are ignored until the inner strategy stops
/// signalling Buy.
pub struct StopLossStrategy {
    inner: Arc<dyn Strategy>,
    percentage: f64,
    name: String,
}

impl StopLossStrategy {
    /// Create a stop loss at `percentage` (0.05 is 5%) below the buy price.
    pub fn new(inner: Arc<dyn Strategy>, percentage: f64) -> Result<Self, StrategyError> {
        if !(percentage > 0.0 && percentage < 1.0) {
            return Err(StrategyError::InvalidConfig(format!(
                "Stop loss percentage must be between 0 and 1, got {percentage}"
            )));
        }

        let name = format!("StopLoss({}, {}%)", inner.name(), percentage * 100.0);
        Ok(Self {
            inner,
            percentage,
            name,
        })
    }
}

impl Strategy for StopLossStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Sells when the price drops below the stop loss level"
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        let keep = 1.0 - self.percentage;
        let mut bought_at: Option<f64> = None;
        let mut stopped = false;

        with_snapshots(self.inner.as_ref(), snapshots, move |snapshot, action| {
            if stopped {
                if action == Action::Buy {
                    return Action::Hold;
                }
                stopped = false;
            }

            if let Some(price) = bought_at {
                if snapshot.close <= price * keep {
                    bought_at = None;
                    stopped = true;
                    return Action::Sell;
                }
            }

            match action {
                Action::Buy if bought_at.is_none() => {
                    bought_at = Some(snapshot.close);
                    Action::Buy
                }
                Action::Sell => {
                    bought_at = None;
                    Action::Sell
                }
                _ => Action::Hold,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowta_helper::{from_vec, to_vec};

    use flowta_core::types::Action::{Buy, Hold, Sell};

    /// Replays a fixed list of actions, one per snapshot.
    struct Scripted {
        actions: Vec<Action>,
    }

    impl Strategy for Scripted {
        fn name(&self) -> &str {
            "Scripted"
        }

        fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
            let actions = self.actions.clone();
            let mut index = 0;
            map(snapshots, move |_| {
                let action = actions.get(index).copied().unwrap_or_default();
                index += 1;
                action
            })
        }
    }

    fn scripted(actions: Vec<Action>) -> Arc<dyn Strategy> {
        Arc::new(Scripted { actions })
    }

    fn closes(prices: &[f64]) -> Sequence<Snapshot> {
        from_vec(
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| Snapshot::new(i as i64, p, p, p, p, 0.0))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_inverse_strategy() {
        let strategy = InverseStrategy::new(scripted(vec![Buy, Hold, Sell]));
        assert_eq!(strategy.name(), "Inverse(Scripted)");

        let actions = to_vec(strategy.compute(closes(&[1.0, 2.0, 3.0]))).await;
        assert_eq!(actions, vec![Sell, Hold, Buy]);
    }

    #[tokio::test]
    async fn test_no_loss_strategy() {
        let strategy = NoLossStrategy::new(scripted(vec![Buy, Buy, Sell, Sell, Buy]));

        let actions = to_vec(strategy.compute(closes(&[10.0, 11.0, 9.0, 12.0, 8.0]))).await;
        assert_eq!(actions, vec![Buy, Hold, Hold, Sell, Buy]);
    }

    #[tokio::test]
    async fn test_stop_loss_strategy() {
        let strategy = StopLossStrategy::new(scripted(vec![Buy; 6]), 0.1).unwrap();
        assert_eq!(strategy.name(), "StopLoss(Scripted, 10%)");

        let actions =
            to_vec(strategy.compute(closes(&[100.0, 95.0, 89.0, 80.0, 120.0, 100.0]))).await;
        assert_eq!(actions, vec![Buy, Hold, Sell, Hold, Hold, Hold]);
    }

    #[tokio::test]
    async fn test_stop_loss_rearms_after_new_signal() {
        let strategy =
            StopLossStrategy::new(scripted(vec![Buy, Buy, Hold, Buy, Sell]), 0.1).unwrap();

        let actions = to_vec(strategy.compute(closes(&[100.0, 80.0, 80.0, 85.0, 90.0]))).await;
        assert_eq!(actions, vec![Buy, Sell, Hold, Buy, Sell]);
    }

    #[test]
    fn test_stop_loss_rejects_invalid_percentage() {
        assert!(StopLossStrategy::new(scripted(vec![]), 0.0).is_err());
        assert!(StopLossStrategy::new(scripted(vec![]), 1.5).is_err());
    }
}
