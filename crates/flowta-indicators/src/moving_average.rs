//! Moving average indicators.

use flowta_core::traits::Indicator;
use flowta_helper::{
    closed, divide_by, duplicate, map_with_previous, moving_sum, operate, skip, Sequence,
};

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for Sma {
    fn default() -> Self {
        Self::new(50)
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn compute(&self, input: Sequence<f64>) -> Sequence<f64> {
        if self.period == 0 {
            return closed();
        }
        divide_by(moving_sum(input, self.period), self.period as f64)
    }

    fn idle_period(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Gives more weight to recent prices using an exponential decay. The first
/// value is the SMA of the first `period` values.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    smoothing: f64,
}

impl Ema {
    /// Default smoothing factor numerator, `k = smoothing / (period + 1)`.
    pub const DEFAULT_SMOOTHING: f64 = 2.0;

    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            smoothing: Self::DEFAULT_SMOOTHING,
        }
    }

    /// Create an EMA with a custom smoothing numerator.
    pub fn with_smoothing(period: usize, smoothing: f64) -> Self {
        Self { period, smoothing }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn multiplier(&self) -> f64 {
        self.smoothing / (self.period as f64 + 1.0)
    }
}

impl Default for Ema {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn compute(&self, input: Sequence<f64>) -> Sequence<f64> {
        smoothed(input, self.period, self.multiplier())
    }

    fn idle_period(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// Running Moving Average (RMA), Wilder's smoothing.
///
/// `rma = (previous * (period - 1) + value) / period`
#[derive(Debug, Clone)]
pub struct Rma {
    period: usize,
}

impl Rma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Rma {
    type Output = f64;

    fn compute(&self, input: Sequence<f64>) -> Sequence<f64> {
        smoothed(input, self.period, 1.0 / self.period as f64)
    }

    fn idle_period(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn name(&self) -> &str {
        "RMA"
    }
}

/// Exponential smoothing seeded with the average of the first `period`
/// values: `next = (value - previous) * multiplier + previous`.
pub(crate) fn smoothed(input: Sequence<f64>, period: usize, multiplier: f64) -> Sequence<f64> {
    if period == 0 {
        return closed();
    }

    let mut forks = duplicate(input, 2);
    let values = skip(forks.pop().unwrap_or_else(closed), period - 1);
    let averages = divide_by(
        moving_sum(forks.pop().unwrap_or_else(closed), period),
        period as f64,
    );

    // Only the first average is used, as the seed.
    let mut seeded = false;
    map_with_previous(
        operate(averages, values, |average, value| (average, value)),
        move |previous, (average, value)| {
            if seeded {
                (value - previous) * multiplier + previous
            } else {
                seeded = true;
                average
            }
        },
        0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowta_helper::{from_vec, to_vec};

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{a} != {e}");
        }
    }

    #[tokio::test]
    async fn test_sma_basic() {
        let sma = Sma::new(3);
        let data = vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0];
        let result = to_vec(sma.compute(from_vec(data))).await;

        assert_close(&result, &[4.0, 6.0, 8.0, 10.0]);
        assert_eq!(sma.idle_period(), 2);
    }

    #[tokio::test]
    async fn test_sma_insufficient_data() {
        let sma = Sma::new(10);
        let result = to_vec(sma.compute(from_vec(vec![1.0, 2.0, 3.0]))).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_sma_zero_period() {
        let sma = Sma::new(0);
        let result = to_vec(sma.compute(from_vec(vec![1.0, 2.0]))).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_ema_basic() {
        // k = 2 / (3 + 1) = 0.5
        let ema = Ema::new(3);
        let result = to_vec(ema.compute(from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]))).await;

        assert_close(&result, &[2.0, 3.0, 4.0]);
    }

    #[tokio::test]
    async fn test_ema_custom_smoothing() {
        // k = 1 / (3 + 1) = 0.25
        let ema = Ema::with_smoothing(3, 1.0);
        let result = to_vec(ema.compute(from_vec(vec![1.0, 2.0, 3.0, 6.0]))).await;

        assert_close(&result, &[2.0, 3.0]);
    }

    #[tokio::test]
    async fn test_rma_basic() {
        let rma = Rma::new(3);
        let result = to_vec(rma.compute(from_vec(vec![1.0, 2.0, 3.0, 5.0]))).await;

        // seed 2.0, then (2 * 2 + 5) / 3
        assert_close(&result, &[2.0, 3.0]);
    }

    #[tokio::test]
    async fn test_ema_insufficient_data() {
        let ema = Ema::new(5);
        let result = to_vec(ema.compute(from_vec(vec![1.0, 2.0, 3.0]))).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_ema_period_one_follows_input() {
        let ema = Ema::new(1);
        let result = to_vec(ema.compute(from_vec(vec![3.0, 7.0, 5.0]))).await;
        assert_close(&result, &[3.0, 7.0, 5.0]);
    }
}
