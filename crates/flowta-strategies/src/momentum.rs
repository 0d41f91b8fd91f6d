//! Momentum/Trend Following Strategy.
//!
//! Follows the MACD: buys while the MACD line is above its signal line and
//! sells while it is below.

use flowta_core::{
    error::StrategyError,
    traits::{Indicator, Strategy, StrategyConfig},
    types::{closings, Action, Snapshot},
};
use flowta_helper::{map, Sequence};
use flowta_indicators::Macd;
use serde::{Deserialize, Serialize};

use crate::actions::hold_through_idle;

/// Configuration for the Momentum strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumConfig {
    /// Fast EMA period
    pub fast_period: usize,
    /// Slow EMA period
    pub slow_period: usize,
    /// Signal line EMA period
    pub signal_period: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl StrategyConfig for MomentumConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.fast_period == 0 || self.signal_period == 0 {
            return Err(StrategyError::InvalidConfig(
                "MACD periods must be greater than 0".into(),
            ));
        }
        if self.fast_period >= self.slow_period {
            return Err(StrategyError::InvalidConfig(
                "Fast period must be less than slow period".into(),
            ));
        }
        Ok(())
    }
}

/// Momentum Strategy.
pub struct MomentumStrategy {
    macd: Macd,
    name: String,
}

impl MomentumStrategy {
    /// Create a new Momentum strategy.
    pub fn new(config: MomentumConfig) -> Self {
        let name = format!(
            "MACD Momentum ({}/{}/{})",
            config.fast_period, config.slow_period, config.signal_period
        );
        Self {
            macd: Macd::new(config.fast_period, config.slow_period, config.signal_period),
            name,
        }
    }
}

impl Default for MomentumStrategy {
    fn default() -> Self {
        Self::new(MomentumConfig::default())
    }
}

impl Strategy for MomentumStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Follows trends using MACD and signal line crossovers"
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        hold_through_idle(snapshots, self.macd.idle_period(), |snapshots| {
            map(self.macd.compute(closings(snapshots)), |value| {
                if value.macd > value.signal {
                    Action::Buy
                } else if value.macd < value.signal {
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
            .map(|(i, &price)| Snapshot::new(i as i64, price, price, price, price, 1000.0))
            .collect()
    }

    #[test]
    fn test_config_validation() {
        assert!(MomentumConfig::default().validate().is_ok());

        let invalid = MomentumConfig {
            fast_period: 30,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());
    }

    #[tokio::test]
    async fn test_output_matches_input_length() {
        let strategy = MomentumStrategy::new(MomentumConfig {
            fast_period: 3,
            slow_period: 6,
            signal_period: 3,
        });
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let actions = to_vec(strategy.compute(from_vec(create_test_snapshots(&prices)))).await;

        assert_eq!(actions.len(), prices.len());
        // idle period is (6 - 1) + (3 - 1)
        assert!(actions[..7].iter().all(|a| *a == Action::Hold));
    }

    #[tokio::test]
    async fn test_accelerating_uptrend_buys() {
        let strategy = MomentumStrategy::new(MomentumConfig {
            fast_period: 3,
            slow_period: 6,
            signal_period: 3,
        });
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + (i * i) as f64).collect();
        let actions = to_vec(strategy.compute(from_vec(create_test_snapshots(&prices)))).await;

        assert_eq!(actions.last(), Some(&Action::Buy));
    }
}
