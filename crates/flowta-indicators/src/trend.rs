//! Trend indicators over high/low prices.

use flowta_core::traits::SnapshotIndicator;
use flowta_core::types::{highs, lows, Snapshot};
use flowta_helper::{
    closed, duplicate, highest, lowest, max_since, min_since, operate, skip, Sequence,
};
use serde::{Deserialize, Serialize};

/// Aroon output, both lines in the range 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AroonOutput {
    pub up: f64,
    pub down: f64,
}

/// Aroon indicator.
///
/// Measures how many periods have passed since the highest high and the
/// lowest low of the last `period + 1` snapshots.
#[derive(Debug, Clone)]
pub struct Aroon {
    period: usize,
}

impl Aroon {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for Aroon {
    fn default() -> Self {
        Self::new(25)
    }
}

impl SnapshotIndicator for Aroon {
    type Output = AroonOutput;

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<AroonOutput> {
        if self.period == 0 {
            return closed();
        }

        let mut forks = duplicate(snapshots, 2);
        let (Some(for_lows), Some(for_highs)) = (forks.pop(), forks.pop()) else {
            return closed();
        };

        let size = self.period + 1;
        let period = self.period as f64;
        let since_high = max_since(highs(for_highs), size);
        let since_low = min_since(lows(for_lows), size);

        let lines = operate(since_high, since_low, move |high, low| AroonOutput {
            up: 100.0 * (period - high as f64) / period,
            down: 100.0 * (period - low as f64) / period,
        });

        skip(lines, self.idle_period())
    }

    fn idle_period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Aroon"
    }
}

/// Donchian channel output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonchianOutput {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Donchian channel: highest high and lowest low of the last `period`
/// snapshots.
#[derive(Debug, Clone)]
pub struct Donchian {
    period: usize,
}

impl Donchian {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for Donchian {
    fn default() -> Self {
        Self::new(20)
    }
}

impl SnapshotIndicator for Donchian {
    type Output = DonchianOutput;

    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<DonchianOutput> {
        if self.period == 0 {
            return closed();
        }

        let mut forks = duplicate(snapshots, 2);
        let (Some(for_lows), Some(for_highs)) = (forks.pop(), forks.pop()) else {
            return closed();
        };

        let upper = highest(highs(for_highs), self.period);
        let lower = lowest(lows(for_lows), self.period);

        let channel = operate(upper, lower, |upper, lower| DonchianOutput {
            upper,
            middle: (upper + lower) / 2.0,
            lower,
        });

        skip(channel, self.idle_period())
    }

    fn idle_period(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn name(&self) -> &str {
        "Donchian"
    }
}
