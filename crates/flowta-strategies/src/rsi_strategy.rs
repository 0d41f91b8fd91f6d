//! RSI-based Trading Strategy.
//!
//! Trades based on RSI overbought/oversold conditions.
//! Buys while RSI is at or below the oversold level,
//! sells while it is at or above the overbought level.

use flowta_core::{
    error::StrategyError,
    traits::{Indicator, Strategy, StrategyConfig},
    types::{closings, Action, Snapshot},
};
use flowta_helper::{map, Sequence};
use flowta_indicators::Rsi;
use serde::{Deserialize, Serialize};

use crate::actions::hold_through_idle;

/// Configuration for the RSI strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiConfig {
    /// RSI calculation period
    pub period: usize,
    /// Overbought threshold (sell above this)
    pub overbought: f64,
    /// Oversold threshold (buy below this)
    pub oversold: f64,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

impl StrategyConfig for RsiConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.period < 2 {
            return Err(StrategyError::InvalidConfig(
                "RSI period must be at least 2".into(),
            ));
        }
        if self.overbought <= self.oversold {
            return Err(StrategyError::InvalidConfig(
                "Overbought must be greater than oversold".into(),
            ));
        }
        if self.overbought > 100.0 || self.oversold < 0.0 {
            return Err(StrategyError::InvalidConfig(
                "RSI thresholds must be between 0 and 100".into(),
            ));
        }
        Ok(())
    }
}

/// RSI Strategy.
pub struct RsiStrategy {
    config: RsiConfig,
    rsi: Rsi,
    name: String,
}

impl RsiStrategy {
    /// Create a new RSI strategy.
    pub fn new(config: RsiConfig) -> Self {
        let name = format!(
            "RSI ({}, {}/{})",
            config.period, config.oversold, config.overbought
        );
        Self {
            rsi: Rsi::new(config.period),
            config,
            name,
        }
    }
}

impl Default for RsiStrategy {
    fn default() -> Self {
        Self::new(RsiConfig::default())
    }
}

impl Strategy for RsiStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Trades RSI overbought/oversold reversals"
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        let RsiConfig {
            overbought,
            oversold,
            ..
        } = self.config;

        hold_through_idle(snapshots, self.rsi.idle_period(), |snapshots| {
            map(self.rsi.compute(closings(snapshots)), move |rsi| {
                if rsi <= oversold {
                    Action::Buy
                } else if rsi >= overbought {
                    Action::Sell
                } else {
                    Action::Hold
                }
            })
        })
    }
}
