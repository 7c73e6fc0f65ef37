use goldpulse_core::{
    Candle, CandleSeries, IchimokuSeries, MarketEvent, MarketState, Timeframe,
};
use goldpulse_indicators as ta;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// Standard indicator periods used for every snapshot.
pub const EMA_TREND_PERIOD: usize = 200;
pub const RSI_PERIOD: usize = 14;
pub const ADX_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;
pub const STOCH_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const TENKAN_PERIOD: usize = 9;
pub const KIJUN_PERIOD: usize = 26;

/// Owns the candle series for one timeframe and turns candle events into
/// immutable [`MarketState`] snapshots.
///
/// Strictly single-threaded and synchronous: each event is folded to
/// completion before the next, so every snapshot observes one consistent
/// series state. Indicators are recomputed against the full current series on
/// every event, never incrementally.
#[derive(Debug)]
pub struct Analyzer {
    timeframe: Timeframe,
    series: CandleSeries,
    session_high: Option<Decimal>,
    session_low: Option<Decimal>,
}

impl Analyzer {
    pub fn new(timeframe: Timeframe, capacity: usize) -> Self {
        Self {
            timeframe,
            series: CandleSeries::new(capacity),
            session_high: None,
            session_low: None,
        }
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn series(&self) -> &CandleSeries {
        &self.series
    }

    /// Fold one market event and build the resulting snapshot.
    /// Returns `None` only when the event leaves the series empty.
    pub fn apply(&mut self, event: MarketEvent) -> Option<MarketState> {
        match event {
            MarketEvent::HistoryLoaded(history) => self.load_history(history),
            MarketEvent::Candle(candle) => Some(self.on_candle(candle)),
        }
    }

    /// Replace the series with freshly loaded history. Session extremes reset
    /// to the latest bar; a fresh load starts a fresh session.
    pub fn load_history(&mut self, history: Vec<Candle>) -> Option<MarketState> {
        self.series.load(history);
        let last = self.series.last()?;
        self.session_high = Some(last.high);
        self.session_low = Some(last.low);
        debug!(
            timeframe = %self.timeframe,
            bars = self.series.len(),
            "history loaded"
        );
        Some(self.snapshot())
    }

    /// Fold a live tick into the series and track the session extremes across
    /// bars (rather than only the open bar's range).
    pub fn on_candle(&mut self, candle: Candle) -> MarketState {
        let high = match self.session_high {
            Some(h) => h.max(candle.high),
            None => candle.high,
        };
        let low = match self.session_low {
            Some(l) => l.min(candle.low),
            None => candle.low,
        };
        self.session_high = Some(high);
        self.session_low = Some(low);
        self.series.append_or_amend(candle);
        self.snapshot()
    }

    /// Ichimoku chart-series projection over the current series.
    pub fn ichimoku_projection(&self) -> IchimokuSeries {
        ta::ichimoku_series(&self.series.candles(), self.timeframe.interval_ms())
    }

    /// Recompute every indicator over the full series and assemble one
    /// immutable snapshot. Must only be called with a non-empty series.
    fn snapshot(&self) -> MarketState {
        let closes = self.series.closes();
        let highs = self.series.highs();
        let lows = self.series.lows();
        let last = self
            .series
            .last()
            .expect("snapshot requires a non-empty series");

        // Change vs the prior bar's close; a lone bar compares to its own open
        let base = self.series.prev_close().unwrap_or(last.open);
        let change = last.close - base;
        let change_percent = if base.is_zero() {
            Decimal::ZERO
        } else {
            change / base * dec!(100)
        };

        MarketState {
            price: last.close,
            change,
            change_percent,
            high: self.session_high.unwrap_or(last.high),
            low: self.session_low.unwrap_or(last.low),
            volume: last.volume,
            ema200: ta::ema(&closes, EMA_TREND_PERIOD),
            rsi: ta::rsi(&closes, RSI_PERIOD),
            adx: ta::adx(&highs, &lows, &closes, ADX_PERIOD),
            atr: ta::atr(&highs, &lows, &closes, ATR_PERIOD),
            macd: ta::macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL),
            bollinger: ta::bollinger(&closes, BOLLINGER_PERIOD, Decimal::TWO),
            stochastic: ta::stochastic(&highs, &lows, &closes, STOCH_PERIOD),
            ichimoku: ta::ichimoku(&highs, &lows, TENKAN_PERIOD, KIJUN_PERIOD),
            pivots: ta::pivot_points(last.high, last.low, last.close),
        }
    }
}
