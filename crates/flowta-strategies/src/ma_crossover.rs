//! Moving Average Crossover Strategy.
//!
//! Buys while the fast MA is above the slow MA and sells while it is below.

use flowta_core::traits::Indicator;
use flowta_core::{
    error::StrategyError,
    traits::{Strategy, StrategyConfig},
    types::{closings, Action, Snapshot},
};
use flowta_helper::{closed, duplicate, operate, sync_period, Sequence};
use flowta_indicators::{Ema, Sma};
use serde::{Deserialize, Serialize};

use crate::actions::hold_through_idle;

/// Configuration for the MA Crossover strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaCrossoverConfig {
    /// Fast moving average period
    pub fast_period: usize,
    /// Slow moving average period
    pub slow_period: usize,
    /// Use EMA instead of SMA
    pub use_ema: bool,
}

impl Default for MaCrossoverConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            use_ema: true,
        }
    }
}

impl StrategyConfig for MaCrossoverConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.fast_period >= self.slow_period {
            return Err(StrategyError::InvalidConfig(
                "Fast period must be less than slow period".into(),
            ));
        }
        if self.fast_period == 0 {
            return Err(StrategyError::InvalidConfig(
                "Fast period must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Moving Average Crossover Strategy.
pub struct MaCrossoverStrategy {
    config: MaCrossoverConfig,
    name: String,
}

impl MaCrossoverStrategy {
    /// Create a new MA Crossover strategy.
    pub fn new(config: MaCrossoverConfig) -> Self {
        let kind = if config.use_ema { "EMA" } else { "SMA" };
        let name = format!(
            "{} Crossover ({}/{})",
            kind, config.fast_period, config.slow_period
        );
        Self { config, name }
    }

    fn moving_average(&self, period: usize, input: Sequence<f64>) -> (Sequence<f64>, usize) {
        if self.config.use_ema {
            let ema = Ema::new(period);
            (ema.compute(input), ema.idle_period())
        } else {
            let sma = Sma::new(period);
            (sma.compute(input), sma.idle_period())
        }
    }

    /// Number of snapshots before the first signal.
    pub fn idle_period(&self) -> usize {
        self.config
            .fast_period
            .max(self.config.slow_period)
            .saturating_sub(1)
    }
}

impl Default for MaCrossoverStrategy {
    fn default() -> Self {
        Self::new(MaCrossoverConfig::default())
    }
}

impl Strategy for MaCrossoverStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Generates signals based on fast/slow moving average crossovers"
    }

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Action> {
        hold_through_idle(snapshots, self.idle_period(), |snapshots| {
            let mut prices = duplicate(closings(snapshots), 2);
            let slow_prices = prices.pop().unwrap_or_else(closed);
            let fast_prices = prices.pop().unwrap_or_else(closed);

            let (fast, fast_idle) = self.moving_average(self.config.fast_period, fast_prices);
            let (slow, slow_idle) = self.moving_average(self.config.slow_period, slow_prices);

            let idle = fast_idle.max(slow_idle);
            let fast = sync_period(idle, fast_idle, fast);
            let slow = sync_period(idle, slow_idle, slow);

            operate(fast, slow, |fast, slow| {
                if fast > slow {
                    Action::Buy
                } else if fast < slow {
                    Action::Sell
                } else {
                    Action::Hold
                }
            })
        })
    }
}
