//! Strategy implementations.
//!
//! This crate provides:
//! - The action laws and outcome simulation every backtest is built on
//! - Indicator based strategies (MA crossover, mean reversion, MACD
//!   momentum, RSI, Aroon) and the buy and hold baseline
//! - Compound strategies (and, or, majority, split) and decorators
//!   (inverse, no loss, stop loss)
//! - A registry of the built-in strategies

mod actions;
mod aroon_strategy;
mod buy_and_hold;
mod compound;
mod decorator;
mod ma_crossover;
mod mean_reversion;
mod momentum;
mod registry;
mod rsi_strategy;

pub use actions::{
    compute_with_outcome, count_transactions, denormalize_actions, normalize_actions, outcome,
};
pub use aroon_strategy::{AroonConfig, AroonStrategy};
pub use buy_and_hold::BuyAndHold;
pub use compound::{AndStrategy, MajorityStrategy, OrStrategy, SplitStrategy};
pub use decorator::{InverseStrategy, NoLossStrategy, StopLossStrategy};
pub use ma_crossover::{MaCrossoverConfig, MaCrossoverStrategy};
pub use mean_reversion::{MeanReversionConfig, MeanReversionStrategy};
pub use momentum::{MomentumConfig, MomentumStrategy};
pub use registry::{MajorityConfig, StrategyInfo, StrategyRegistry};
pub use rsi_strategy::{RsiConfig, RsiStrategy};
