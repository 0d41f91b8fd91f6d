//! Per-strategy backtest results.

use serde::{Deserialize, Serialize};

use super::Action;

/// Outcome of running one strategy over one asset's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Asset name
    pub asset: String,
    /// Strategy name
    pub strategy: String,
    /// Final action recommended by the strategy
    pub action: Action,
    /// Number of periods the final position has been held
    pub since: usize,
    /// Final outcome ratio (0.0 means break-even)
    pub outcome: f64,
    /// Number of buy and sell transactions
    pub transactions: usize,
}

/// Sort results from the best outcome to the worst. NaN outcomes go last.
pub fn sort_by_outcome(results: &mut [StrategyResult]) {
    results.sort_by(|a, b| {
        a.outcome
            .is_nan()
            .cmp(&b.outcome.is_nan())
            .then_with(|| b.outcome.total_cmp(&a.outcome))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(strategy: &str, outcome: f64) -> StrategyResult {
        StrategyResult {
            asset: "AAPL".to_string(),
            strategy: strategy.to_string(),
            action: Action::Hold,
            since: 0,
            outcome,
            transactions: 0,
        }
    }

    #[test]
    fn test_sort_by_outcome() {
        let mut results = vec![result("a", -0.2), result("b", 0.5), result("c", 0.1)];
        sort_by_outcome(&mut results);

        let names: Vec<&str> = results.iter().map(|r| r.strategy.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_by_outcome_nan_last() {
        let mut results = vec![
            result("nan", f64::NAN),
            result("a", -0.2),
            result("b", 0.5),
            result("neg_nan", -f64::NAN),
        ];
        sort_by_outcome(&mut results);

        let names: Vec<&str> = results.iter().map(|r| r.strategy.as_str()).collect();
        assert_eq!(&names[..2], &["b", "a"]);
        assert!(results[2..].iter().all(|r| r.outcome.is_nan()));
    }
}
