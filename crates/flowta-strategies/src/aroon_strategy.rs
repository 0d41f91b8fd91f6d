//! Aroon Trend Strategy.
//!
//! Buys while Aroon Up is above Aroon Down (recent highs dominate) and
//! sells in the opposite case.

use flowta_core::{
    error::StrategyError,
    traits::{SnapshotIndicator, Strategy, StrategyConfig},
    types::{Action, Snapshot},
};
use flowta_helper::{map, Sequence};
use flowta_indicators::Aroon;
use serde::{Deserialize, Serialize};

use crate::actions::hold_through_idle;

/// Configuration for the Aroon strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AroonConfig {
    /// Aroon lookback period
    pub period: usize,
}

impl Default for AroonConfig {
    fn default() -> Self {
        Self { period: 25 }
    }
}

impl StrategyConfig for AroonConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.period == 0 {
            return Err(StrategyError::InvalidConfig(
                "Aroon period must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Aroon Strategy.
pub struct AroonStrategy {
    aroon: Aroon,
    name: String,
}

impl AroonStrategy {
    pub fn new(config: AroonConfig) -> Self {
        Self {
            aroon: Aroon::new(config.period),
            name: format!("Aroon ({})", config.period),
        }
    }
}

impl Default for AroonStrategy {
    fn default() -> Self {
        Self::new(AroonConfig::default())
    }
}

impl Strategy for AroonStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Follows trends identified by the Aroon up/down lines"
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        hold_through_idle(snapshots, self.aroon.idle_period(), |snapshots| {
            map(self.aroon.compute(snapshots), |lines| {
                if lines.up > lines.down {
                    Action::Buy
                } else if lines.down > lines.up {
                    Action::Sell
                } else {
                    Action::Hold
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowta_helper::{from_vec, to_vec};

    fn create_test_snapshots(prices: &[f64]) -> Vec<Snapshot> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| Snapshot::new(i as i64, price, price + 1.0, price - 1.0, price, 0.0))
            .collect()
    }

    #[tokio::test]
    async fn test_trend_following() {
        let strategy = AroonStrategy::new(AroonConfig { period: 3 });
        let prices = [10.0, 11.0, 12.0, 13.0, 14.0, 13.0, 12.0, 11.0, 10.0];
        let actions = to_vec(strategy.compute(from_vec(create_test_snapshots(&prices)))).await;

        assert_eq!(actions.len(), prices.len());
        assert!(actions[..3].iter().all(|a| *a == Action::Hold));
        assert_eq!(actions[3], Action::Buy);
        assert_eq!(actions[8], Action::Sell);
    }

    #[test]
    fn test_config_validation() {
        assert!(AroonConfig::default().validate().is_ok());
        assert!(AroonConfig { period: 0 }.validate().is_err());
    }
}
