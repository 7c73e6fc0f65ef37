use goldpulse_core::{Candle, IchimokuSeries, MarketState, Signal, Timeframe};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Shared application state accessible by all route handlers.
///
/// Holds the latest pipeline outputs only; the pipeline task writes, handlers
/// read. Snapshots stored here are already calibrated for presentation.
#[derive(Default)]
pub struct AppState {
    pub snapshot: RwLock<Option<MarketState>>,
    pub signals: RwLock<HashMap<Timeframe, Signal>>,
    pub candles: RwLock<Vec<Candle>>,
    pub ichimoku: RwLock<IchimokuSeries>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn publish_snapshot(&self, snapshot: MarketState) {
        *self.snapshot.write().await = Some(snapshot);
    }

    pub async fn publish_signal(&self, signal: Signal) {
        self.signals.write().await.insert(signal.timeframe, signal);
    }

    pub async fn publish_chart(&self, candles: Vec<Candle>, ichimoku: IchimokuSeries) {
        *self.candles.write().await = candles;
        *self.ichimoku.write().await = ichimoku;
    }
}
