//! Volatility indicators.

use flowta_core::traits::Indicator;
use flowta_helper::{closed, duplicate, operate, skip, window, Sequence};
use serde::{Deserialize, Serialize};

use crate::moving_average::Sma;

/// Moving population standard deviation.
#[derive(Debug, Clone)]
pub struct MovingStd {
    period: usize,
}

impl MovingStd {
    /// Create a new standard deviation indicator.
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for MovingStd {
    type Output = f64;

    fn compute(&self, input: Sequence<f64>) -> Sequence<f64> {
        if self.period == 0 {
            return closed();
        }

        let deviations = window(
            input,
            |w: &[f64], _| {
                let n = w.len() as f64;
                let mean = w.iter().sum::<f64>() / n;
                let variance = w.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
                variance.sqrt()
            },
            self.period,
        );

        skip(deviations, self.idle_period())
    }

    fn idle_period(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger Bands.
///
/// A middle SMA band with upper and lower bands a number of standard
/// deviations away from it.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands.
    ///
    /// Standard parameters are period=20, multiplier=2.0.
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self { period, multiplier }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerOutput;

    fn compute(&self, input: Sequence<f64>) -> Sequence<BollingerOutput> {
        if self.period == 0 {
            return closed();
        }

        let mut forks = duplicate(input, 2);
        let (Some(for_std), Some(for_sma)) = (forks.pop(), forks.pop()) else {
            return closed();
        };

        let middle = Sma::new(self.period).compute(for_sma);
        let std = MovingStd::new(self.period).compute(for_std);
        let multiplier = self.multiplier;

        operate(middle, std, move |middle, std| BollingerOutput {
            upper: middle + multiplier * std,
            middle,
            lower: middle - multiplier * std,
        })
    }

    fn idle_period(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn name(&self) -> &str {
        "BB"
    }
}
