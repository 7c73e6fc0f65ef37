use crate::models::Candle;
use serde::{Deserialize, Serialize};

/// The two external events that drive indicator recomputation.
///
/// Each event is processed to completion before the next one, so a snapshot
/// never observes the series mid-mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MarketEvent {
    /// Full history arrived (startup or resubscription). Replaces the series
    /// and resets session extremes.
    HistoryLoaded(Vec<Candle>),
    /// A live tick for the open or a freshly closed bar.
    Candle(Candle),
}
