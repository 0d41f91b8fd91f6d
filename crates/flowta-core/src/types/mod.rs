//! Core data types for flowta.

mod action;
mod result;
mod snapshot;

pub use action::Action;
pub use result::{sort_by_outcome, StrategyResult};
pub use snapshot::{closings, highs, lows, openings, typical_prices, volumes, Snapshot};
