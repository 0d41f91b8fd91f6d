//! Buy and Hold Strategy.
//!
//! Buys on the first snapshot and never sells. Serves as the baseline the
//! other strategies are compared against.

use flowta_core::traits::Strategy;
use flowta_core::types::{Action, Snapshot};
use flowta_helper::{map, Sequence};

/// Buy and Hold Strategy.
#[derive(Debug, Clone, Default)]
pub struct BuyAndHold;

impl BuyAndHold {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for BuyAndHold {
    fn name(&self) -> &str {
        "Buy and Hold"
    }

    fn description(&self) -> &str {
        "Buys once and holds the position until the end"
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        map(snapshots, |_| Action::Buy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowta_helper::{from_vec, to_vec};

    #[tokio::test]
    async fn test_buy_and_hold() {
        let snapshots = vec![Snapshot::default(); 4];
        let actions = to_vec(BuyAndHold::new().compute(from_vec(snapshots))).await;
        assert_eq!(actions, vec![Action::Buy; 4]);
    }
}
