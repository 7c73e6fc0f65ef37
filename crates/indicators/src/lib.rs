//! Batch technical indicators.
//!
//! Every function here is pure: a slice (or an OHLC triple of slices) and a
//! period in, a numeric result out, no hidden state. The engine recomputes
//! each indicator against the full current series on every update rather than
//! maintaining incremental state.
//!
//! All indicators degrade gracefully when history is shorter than their
//! period, returning a documented neutral value instead of failing, so a
//! structurally complete snapshot exists from the very first bar.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod ichimoku;
pub mod macd;
pub mod pivot;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use adx::adx;
pub use atr::atr;
pub use bollinger::{bollinger, decimal_sqrt};
pub use ema::{ema, ema_series};
pub use ichimoku::{ichimoku, ichimoku_series};
pub use macd::macd;
pub use pivot::pivot_points;
pub use rsi::rsi;
pub use sma::sma;
pub use stochastic::stochastic;
