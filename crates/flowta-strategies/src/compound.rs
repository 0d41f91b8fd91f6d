//! Strategies that combine the actions of several other strategies.

use std::sync::Arc;

use flowta_core::traits::Strategy;
use flowta_core::types::{Action, Snapshot};
use flowta_helper::{closed, duplicate, map, operate, operate_all, Sequence};

/// Run every strategy over its own fork of the snapshots and combine the
/// actions of each step with `combine`.
fn combine_all<F>(
    strategies: &[Arc<dyn Strategy>],
    snapshots: Sequence<Snapshot>,
    combine: F,
) -> Sequence<Action>
where
    F: FnMut(Vec<Action>) -> Action + Send + 'static,
{
    if strategies.is_empty() {
        return map(snapshots, |_| Action::Hold);
    }

    let forks = duplicate(snapshots, strategies.len());
    let actions = strategies
        .iter()
        .zip(forks)
        .map(|(strategy, fork)| strategy.compute(fork))
        .collect();

    operate_all(actions, combine)
}

fn joined_names(strategies: &[Arc<dyn Strategy>]) -> String {
    strategies
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Acts only when every strategy agrees.
pub struct AndStrategy {
    strategies: Vec<Arc<dyn Strategy>>,
    name: String,
}

impl AndStrategy {
    pub fn new(strategies: Vec<Arc<dyn Strategy>>) -> Self {
        let name = format!("And({})", joined_names(&strategies));
        Self { strategies, name }
    }
}

impl Strategy for AndStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Buys or sells only when all strategies agree"
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        combine_all(&self.strategies, snapshots, |actions| {
            let first = actions[0];
            if actions.iter().all(|a| *a == first) {
                first
            } else {
                Action::Hold
            }
        })
    }
}

/// Acts when any strategy signals and none signals the opposite.
pub struct OrStrategy {
    strategies: Vec<Arc<dyn Strategy>>,
    name: String,
}

impl OrStrategy {
    pub fn new(strategies: Vec<Arc<dyn Strategy>>) -> Self {
        let name = format!("Or({})", joined_names(&strategies));
        Self { strategies, name }
    }
}

impl Strategy for OrStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Buys or sells when any strategy signals without a conflicting signal"
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        combine_all(&self.strategies, snapshots, |actions| {
            let buys = actions.iter().any(|a| *a == Action::Buy);
            let sells = actions.iter().any(|a| *a == Action::Sell);
            match (buys, sells) {
                (true, false) => Action::Buy,
                (false, true) => Action::Sell,
                _ => Action::Hold,
            }
        })
    }
}

/// Follows the action more than half of the strategies agree on.
pub struct MajorityStrategy {
    strategies: Vec<Arc<dyn Strategy>>,
    name: String,
}

impl MajorityStrategy {
    pub fn new(strategies: Vec<Arc<dyn Strategy>>) -> Self {
        let name = format!("Majority({})", joined_names(&strategies));
        Self { strategies, name }
    }

    /// Create with a custom display name.
    pub fn with_name(name: impl Into<String>, strategies: Vec<Arc<dyn Strategy>>) -> Self {
        Self {
            strategies,
            name: name.into(),
        }
    }
}

impl Strategy for MajorityStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Follows the action the majority of strategies agree on"
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        combine_all(&self.strategies, snapshots, |actions| {
            let half = actions.len() / 2;
            let buys = actions.iter().filter(|a| **a == Action::Buy).count();
            let sells = actions.iter().filter(|a| **a == Action::Sell).count();

            if buys > half {
                Action::Buy
            } else if sells > half {
                Action::Sell
            } else {
                Action::Hold
            }
        })
    }
}

/// Takes buy signals from one strategy and sell signals from another.
pub struct SplitStrategy {
    buy: Arc<dyn Strategy>,
    sell: Arc<dyn Strategy>,
    name: String,
}

impl SplitStrategy {
    pub fn new(buy: Arc<dyn Strategy>, sell: Arc<dyn Strategy>) -> Self {
        let name = format!("Split(buy: {}, sell: {})", buy.name(), sell.name());
        Self { buy, sell, name }
    }
}

impl Strategy for SplitStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Buys on one strategy's signals and sells on another's"
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        let mut forks = duplicate(snapshots, 2);
        let sell_actions = self.sell.compute(forks.pop().unwrap_or_else(closed));
        let buy_actions = self.buy.compute(forks.pop().unwrap_or_else(closed));

        operate(buy_actions, sell_actions, |buy, sell| match (buy, sell) {
            (Action::Buy, Action::Sell) => Action::Hold,
            (Action::Buy, _) => Action::Buy,
            (_, Action::Sell) => Action::Sell,
            _ => Action::Hold,
        })
    }
}
