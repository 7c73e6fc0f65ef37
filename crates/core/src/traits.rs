use crate::models::*;
use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Market Data Feed
// ---------------------------------------------------------------------------

/// Errors from the market-data collaborator.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    Http(String),
    #[error("Malformed payload: {0}")]
    Parse(String),
    #[error("Stream closed")]
    StreamClosed,
}

/// Supplies historical candles and a live candle stream.
///
/// History must arrive fully ordered ascending by time; live ticks arrive with
/// non-decreasing time, and "same bucket = amend, else append" is the only
/// de-duplication signal the series relies on.
#[async_trait]
pub trait MarketDataFeed: Send + Sync {
    /// Fetch up to `limit` historical candles, ascending by time.
    async fn fetch_history(
        &self,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, FeedError>;

    /// Subscribe to live candles. The stream ends when the receiver is dropped.
    async fn subscribe(
        &self,
        timeframe: Timeframe,
    ) -> Result<tokio::sync::mpsc::Receiver<Candle>, FeedError>;
}

// ---------------------------------------------------------------------------
// Signal Provider
// ---------------------------------------------------------------------------

/// Errors from the AI signal collaborator. All of these are recoverable by
/// contract: the caller substitutes the local heuristic and carries on.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("Provider not configured: {0}")]
    Unconfigured(String),
    #[error("Request failed: {0}")]
    Http(String),
    #[error("Response failed schema validation: {0}")]
    Schema(String),
}

/// Turns a market snapshot into a trading signal for one timeframe.
#[async_trait]
pub trait SignalProvider: Send + Sync {
    async fn generate(
        &self,
        snapshot: &MarketState,
        timeframe: Timeframe,
    ) -> Result<Signal, SignalError>;
}
