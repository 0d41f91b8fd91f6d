//! Strategy trait definitions.

use flowta_helper::Sequence;

use crate::error::StrategyError;
use crate::types::{Action, Snapshot};

/// Configuration trait for strategies.
pub trait StrategyConfig: Send + Sync + Clone + 'static {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), StrategyError>;
}

/// Core strategy trait.
///
/// A strategy turns a sequence of snapshots into a sequence of actions,
/// emitting exactly one action per snapshot. Strategies are shared between
/// backtest workers, so `compute` takes `&self` and keeps any per-run state
/// inside the pipeline it builds.
pub trait Strategy: Send + Sync {
    /// Get the display name of this strategy.
    fn name(&self) -> &str;

    /// Build the action pipeline for the given snapshots.
    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action>;

    /// Get a description of the strategy.
    fn description(&self) -> &str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowta_helper::{from_vec, map, to_vec};

    struct TestStrategy {
        threshold: f64,
    }

    impl Strategy for TestStrategy {
        fn name(&self) -> &str {
            "Test Strategy"
        }

        fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
            let threshold = self.threshold;
            map(snapshots, move |s| {
                if s.close > threshold {
                    Action::Sell
                } else {
                    Action::Buy
                }
            })
        }
    }

    #[tokio::test]
    async fn test_strategy_one_action_per_snapshot() {
        let strategy = TestStrategy { threshold: 100.0 };
        let snapshots = vec![
            Snapshot::new(1, 0.0, 0.0, 0.0, 99.0, 0.0),
            Snapshot::new(2, 0.0, 0.0, 0.0, 101.0, 0.0),
        ];

        let actions = to_vec(strategy.compute(from_vec(snapshots))).await;
        assert_eq!(actions, vec![Action::Buy, Action::Sell]);
        assert_eq!(strategy.name(), "Test Strategy");
        assert_eq!(strategy.description(), "");
    }
}
