//! Mean Reversion Strategy using Bollinger Bands.
//!
//! Buys when the price closes below the lower band and sells when it
//! closes above the upper band, expecting a reversion to the middle band.

use flowta_core::traits::Indicator;
use flowta_core::{
    error::StrategyError,
    traits::{Strategy, StrategyConfig},
    types::{closings, Action, Snapshot},
};
use flowta_helper::{closed, duplicate, operate, skip, Sequence};
use flowta_indicators::BollingerBands;
use serde::{Deserialize, Serialize};

use crate::actions::hold_through_idle;

/// Configuration for the Mean Reversion strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeanReversionConfig {
    /// Bollinger Bands period
    pub period: usize,
    /// Standard deviation multiplier for the bands
    pub std_multiplier: f64,
}

impl Default for MeanReversionConfig {
    fn default() -> Self {
        Self {
            period: 20,
            std_multiplier: 2.0,
        }
    }
}

impl StrategyConfig for MeanReversionConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.period < 2 {
            return Err(StrategyError::InvalidConfig(
                "Period must be at least 2".into(),
            ));
        }
        if self.std_multiplier <= 0.0 {
            return Err(StrategyError::InvalidConfig(
                "Standard deviation multiplier must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Mean Reversion Strategy.
pub struct MeanReversionStrategy {
    bands: BollingerBands,
    name: String,
}

impl MeanReversionStrategy {
    /// Create a new Mean Reversion strategy.
    pub fn new(config: MeanReversionConfig) -> Self {
        let name = format!(
            "Mean Reversion ({}, {})",
            config.period, config.std_multiplier
        );
        Self {
            bands: BollingerBands::new(config.period, config.std_multiplier),
            name,
        }
    }
}

impl Default for MeanReversionStrategy {
    fn default() -> Self {
        Self::new(MeanReversionConfig::default())
    }
}

impl Strategy for MeanReversionStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Trades reversions to the mean using Bollinger Bands"
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        let idle = self.bands.idle_period();

        hold_through_idle(snapshots, idle, |snapshots| {
            let mut prices = duplicate(closings(snapshots), 2);
            let for_bands = prices.pop().unwrap_or_else(closed);
            let current = skip(prices.pop().unwrap_or_else(closed), idle);

            operate(current, self.bands.compute(for_bands), |close, band| {
                if close < band.lower {
                    Action::Buy
                } else if close > band.upper {
                    Action::Sell
                } else {
                    Action::Hold
                }
            })
        })
    }
}
