//! Strategy actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recommendation emitted by a strategy for one time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Action {
    Sell,
    #[default]
    Hold,
    Buy,
}

impl Action {
    /// Numeric value: -1 for sell, 0 for hold, 1 for buy.
    pub fn value(self) -> i8 {
        match self {
            Action::Sell => -1,
            Action::Hold => 0,
            Action::Buy => 1,
        }
    }

    /// Single letter used when annotating charts and tables.
    pub fn annotation(self) -> &'static str {
        match self {
            Action::Sell => "S",
            Action::Hold => "",
            Action::Buy => "B",
        }
    }

    /// Buy becomes sell and sell becomes buy.
    pub fn inverse(self) -> Self {
        match self {
            Action::Sell => Action::Buy,
            Action::Hold => Action::Hold,
            Action::Buy => Action::Sell,
        }
    }
}

impl From<i8> for Action {
    fn from(value: i8) -> Self {
        match value {
            v if v < 0 => Action::Sell,
            0 => Action::Hold,
            _ => Action::Buy,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Sell => "Sell",
            Action::Hold => "Hold",
            Action::Buy => "Buy",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_values() {
        assert_eq!(Action::Sell.value(), -1);
        assert_eq!(Action::Hold.value(), 0);
        assert_eq!(Action::Buy.value(), 1);
        assert_eq!(Action::from(-3), Action::Sell);
        assert_eq!(Action::from(0), Action::Hold);
        assert_eq!(Action::from(2), Action::Buy);
    }

    #[test]
    fn test_action_annotation_and_display() {
        assert_eq!(Action::Buy.annotation(), "B");
        assert_eq!(Action::Hold.annotation(), "");
        assert_eq!(Action::Sell.to_string(), "Sell");
        assert_eq!(Action::Buy.inverse(), Action::Sell);
        assert_eq!(Action::default(), Action::Hold);
    }
}
