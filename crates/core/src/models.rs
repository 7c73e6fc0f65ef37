use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Market Data
// ---------------------------------------------------------------------------

/// A single OHLCV bar.
///
/// `time` is the epoch-millisecond open time of the bar's bucket. While the
/// bucket is still open the feed re-sends the bar with the same `time`, which
/// is the series' signal to amend in place rather than append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// Chart timeframe for bars and signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "1h")]
    H1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [Timeframe::M1, Timeframe::M5, Timeframe::M15, Timeframe::H1];

    /// Interval code as used in stream names and API params ("1m", "5m", ...).
    pub fn code(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
        }
    }

    /// Bar duration in milliseconds.
    pub fn interval_ms(&self) -> i64 {
        match self {
            Timeframe::M1 => 60_000,
            Timeframe::M5 => 300_000,
            Timeframe::M15 => 900_000,
            Timeframe::H1 => 3_600_000,
        }
    }

    /// Stop-loss distance multiplier on ATR: tighter on the fastest timeframe.
    pub fn sl_multiplier(&self) -> Decimal {
        match self {
            Timeframe::M1 => dec!(1.5),
            _ => dec!(2.0),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Indicator Results
// ---------------------------------------------------------------------------

/// MACD components, all taken at the last bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub macd: Decimal,
    pub signal: Decimal,
    pub histogram: Decimal,
}

impl Macd {
    pub const NEUTRAL: Macd = Macd {
        macd: Decimal::ZERO,
        signal: Decimal::ZERO,
        histogram: Decimal::ZERO,
    };
}

/// Bollinger Bands. Invariant: `lower <= middle <= upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bollinger {
    pub upper: Decimal,
    pub middle: Decimal,
    pub lower: Decimal,
}

/// Stochastic oscillator, %K and %D both in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stochastic {
    pub k: Decimal,
    pub d: Decimal,
}

/// Position of the Tenkan line relative to the cloud baseline.
///
/// `Inside` is reserved for a full span-membership test against Senkou A/B;
/// the scalar Tenkan-vs-Kijun computation only ever yields `Above` or `Below`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloudStatus {
    Above,
    Below,
    Inside,
}

/// Ichimoku conversion/base lines and cloud position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ichimoku {
    pub tenkan: Decimal,
    pub kijun: Decimal,
    pub cloud: CloudStatus,
}

/// Classic floor pivots. Invariant: `s2 <= s1 <= pivot <= r1 <= r2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    pub pivot: Decimal,
    pub r1: Decimal,
    pub s1: Decimal,
    pub r2: Decimal,
    pub s2: Decimal,
}

/// One time-stamped point on a chart line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: i64,
    pub value: Decimal,
}

/// The four Ichimoku chart lines, with the spans forward-shifted in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IchimokuSeries {
    pub tenkan: Vec<SeriesPoint>,
    pub kijun: Vec<SeriesPoint>,
    pub span_a: Vec<SeriesPoint>,
    pub span_b: Vec<SeriesPoint>,
}

// ---------------------------------------------------------------------------
// Market State (snapshot)
// ---------------------------------------------------------------------------

/// Immutable snapshot of the market built on every series update.
///
/// Carries the latest bar's headline figures plus one instance of every
/// indicator result, so downstream signal generation never has to touch the
/// candle series itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: Decimal,
    pub ema200: Decimal,
    pub rsi: Decimal,
    pub adx: Decimal,
    pub atr: Decimal,
    pub macd: Macd,
    pub bollinger: Bollinger,
    pub stochastic: Stochastic,
    pub ichimoku: Ichimoku,
    pub pivots: PivotPoints,
}

impl MarketState {
    /// Apply an additive calibration offset to the price-level fields.
    ///
    /// Indicators are always computed on raw feed prices; the offset shifts
    /// presentation values only. Differences (change, ATR, MACD) and bounded
    /// oscillators (RSI, ADX, stochastic) are invariant under a uniform shift
    /// and stay as computed.
    pub fn calibrated(&self, offset: Decimal) -> MarketState {
        if offset.is_zero() {
            return self.clone();
        }
        let mut out = self.clone();
        out.price += offset;
        out.high += offset;
        out.low += offset;
        out.ema200 += offset;
        out.bollinger.upper += offset;
        out.bollinger.middle += offset;
        out.bollinger.lower += offset;
        out.ichimoku.tenkan += offset;
        out.ichimoku.kijun += offset;
        out.pivots.pivot += offset;
        out.pivots.r1 += offset;
        out.pivots.s1 += offset;
        out.pivots.r2 += offset;
        out.pivots.s2 += offset;
        out
    }
}

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// Trading action recommended for one timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalAction {
    Buy,
    Sell,
    Neutral,
    Wait,
}

/// Where a signal came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalSource {
    /// Returned by the AI completion service.
    Ai { model: String },
    /// Produced locally by the deterministic rule engine.
    Heuristic,
}

/// A trading signal for one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: Uuid,
    pub timeframe: Timeframe,
    pub action: SignalAction,
    /// 0–100.
    pub confidence: u8,
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    pub reasoning: String,
    pub source: SignalSource,
    pub timestamp: DateTime<Utc>,
}
