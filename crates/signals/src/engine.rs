use goldpulse_core::{MarketState, Signal, SignalProvider, Timeframe};
use tracing::{debug, warn};

use crate::fallback::heuristic_signal;

/// Produces one signal per cycle, preferring the AI collaborator and
/// substituting the local heuristic on any failure. Never errors: the
/// fallback path is part of the contract.
///
/// Cycles run on a fixed interval decoupled from tick processing. Calls from
/// overlapping cycles are allowed to race; the last response to resolve wins.
/// The interval is far coarser than completion latency, so this is a
/// documented behavior, not an accident.
pub struct SignalEngine {
    provider: Option<Box<dyn SignalProvider>>,
}

impl SignalEngine {
    pub fn new(provider: Option<Box<dyn SignalProvider>>) -> Self {
        Self { provider }
    }

    /// Heuristic-only engine (no AI collaborator configured).
    pub fn heuristic_only() -> Self {
        Self { provider: None }
    }

    pub async fn generate(&self, snapshot: &MarketState, timeframe: Timeframe) -> Signal {
        if let Some(provider) = &self.provider {
            match provider.generate(snapshot, timeframe).await {
                Ok(signal) => {
                    debug!(%timeframe, action = ?signal.action, "AI signal");
                    return signal;
                }
                Err(err) => {
                    warn!(%timeframe, %err, "AI provider failed, using heuristic");
                }
            }
        }
        heuristic_signal(snapshot, timeframe)
    }
}
