//! Streaming technical indicators.
//!
//! Every indicator is assembled from `flowta-helper` combinators and
//! consumes a [`flowta_helper::Sequence`]:
//! - Moving averages (SMA, EMA, RMA)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (moving standard deviation, Bollinger Bands)
//! - Trend indicators (Aroon, Donchian channel)
//!
//! An indicator emits nothing for its first `idle_period()` inputs and one
//! value per input afterwards.

pub mod momentum;
pub mod moving_average;
pub mod trend;
pub mod volatility;

pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Rma, Sma};
pub use trend::{Aroon, AroonOutput, Donchian, DonchianOutput};
pub use volatility::{BollingerBands, BollingerOutput, MovingStd};
