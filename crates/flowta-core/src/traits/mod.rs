//! Core traits for flowta.

mod indicator;
mod report;
mod repository;
mod strategy;

pub use indicator::{Indicator, SnapshotIndicator};
pub use report::Report;
pub use repository::Repository;
pub use strategy::{Strategy, StrategyConfig};
