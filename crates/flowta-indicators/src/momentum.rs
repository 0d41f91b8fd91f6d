//! Momentum indicators.

use flowta_core::traits::Indicator;
use flowta_helper::{
    abs, change, closed, duplicate, keep_negatives, keep_positives, operate, subtract,
    sync_period, Sequence,
};
use serde::{Deserialize, Serialize};

use crate::moving_average::{Ema, Rma};

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn compute(&self, input: Sequence<f64>) -> Sequence<f64> {
        if self.period == 0 {
            return closed();
        }

        let rma = Rma::new(self.period);
        let mut changes = duplicate(change(input, 1), 2);
        let (Some(losses), Some(gains)) = (changes.pop(), changes.pop()) else {
            return closed();
        };

        let average_gains = rma.compute(keep_positives(gains));
        let average_losses = rma.compute(abs(keep_negatives(losses)));

        operate(average_gains, average_losses, |gain, loss| {
            if loss == 0.0 {
                100.0
            } else {
                100.0 - 100.0 / (1.0 + gain / loss)
            }
        })
    }

    fn idle_period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD output values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Moving Average Convergence Divergence (MACD).
///
/// Trend-following momentum indicator that shows the relationship
/// between two exponential moving averages.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    /// Create a new MACD indicator.
    ///
    /// Standard parameters are (12, 26, 9).
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn compute(&self, input: Sequence<f64>) -> Sequence<MacdOutput> {
        if self.fast == 0 || self.slow == 0 || self.signal == 0 {
            return closed();
        }

        let fast = Ema::new(self.fast);
        let slow = Ema::new(self.slow);
        let signal = Ema::new(self.signal);

        let mut prices = duplicate(input, 2);
        let (Some(slow_prices), Some(fast_prices)) = (prices.pop(), prices.pop()) else {
            return closed();
        };

        let common = fast.idle_period().max(slow.idle_period());
        let fast_line = sync_period(common, fast.idle_period(), fast.compute(fast_prices));
        let slow_line = sync_period(common, slow.idle_period(), slow.compute(slow_prices));

        let mut macd = duplicate(subtract(fast_line, slow_line), 2);
        let (Some(for_signal), Some(macd_line)) = (macd.pop(), macd.pop()) else {
            return closed();
        };

        let signal_line = signal.compute(for_signal);
        let macd_line = sync_period(signal.idle_period(), 0, macd_line);

        operate(macd_line, signal_line, |macd, signal| MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        })
    }

    fn idle_period(&self) -> usize {
        self.fast.max(self.slow).saturating_sub(1) + self.signal.saturating_sub(1)
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowta_helper::{from_vec, to_vec};

    #[tokio::test]
    async fn test_rsi_basic() {
        let rsi = Rsi::new(14);
        // Generate test data with alternating up/down moves
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = to_vec(rsi.compute(from_vec(data))).await;
        assert_eq!(result.len(), 30 - rsi.idle_period());

        // All RSI values should be between 0 and 100
        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[tokio::test]
    async fn test_rsi_all_gains() {
        let rsi = Rsi::new(5);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let result = to_vec(rsi.compute(from_vec(data))).await;

        assert_eq!(result.len(), 2);
        // All gains = RSI should be 100
        assert!((result[0] - 100.0).abs() < 1e-10);
    }

    #[tokio::test]
    async fn test_rsi_all_losses() {
        let rsi = Rsi::new(3);
        let data = vec![9.0, 8.0, 7.0, 6.0, 5.0];
        let result = to_vec(rsi.compute(from_vec(data))).await;

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|v| v.abs() < 1e-10));
    }

    #[tokio::test]
    async fn test_macd_constant_prices() {
        let macd = Macd::new(3, 5, 2);
        let data = vec![10.0; 12];
        let result = to_vec(macd.compute(from_vec(data))).await;

        assert_eq!(macd.idle_period(), 5);
        assert_eq!(result.len(), 12 - macd.idle_period());
        for value in &result {
            assert!(value.macd.abs() < 1e-10);
            assert!(value.signal.abs() < 1e-10);
            assert!(value.histogram.abs() < 1e-10);
        }
    }

    #[tokio::test]
    async fn test_macd_uptrend_positive() {
        let macd = Macd::default();
        let data: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let result = to_vec(macd.compute(from_vec(data))).await;

        assert_eq!(result.len(), 60 - 33);
        // Fast EMA stays above slow EMA in a steady uptrend
        assert!(result.iter().all(|v| v.macd > 0.0));
        for value in &result {
            assert!((value.histogram - (value.macd - value.signal)).abs() < 1e-10);
        }
    }
}
