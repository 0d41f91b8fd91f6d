//! Core types and traits for flowta.
//!
//! This crate provides the foundational building blocks including:
//! - Market data snapshots and their projections into price sequences
//! - Strategy actions and per-strategy backtest results
//! - Core traits for strategies, indicators, repositories, and reports

pub mod types;
pub mod traits;
pub mod error;

pub use error::{FlowError, FlowResult};
pub use types::*;
pub use traits::*;
