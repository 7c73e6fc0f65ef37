//! Market-data feed adapters.
//!
//! The feed owns all upstream validation: anything that reaches the engine is
//! an ordered, well-formed candle. Connection state and endpoints live in an
//! explicit [`FeedConfig`], never in ambient globals.

pub mod binance;

pub use binance::{BinanceFeed, FeedConfig};
