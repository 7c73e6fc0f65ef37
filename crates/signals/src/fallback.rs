use chrono::Utc;
use goldpulse_core::{MarketState, Signal, SignalAction, SignalSource, Timeframe};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

const RSI_PULLBACK_MAX: Decimal = dec!(45);
const RSI_RALLY_MIN: Decimal = dec!(55);
const ADX_RANGING_MAX: Decimal = dec!(20);

const CONFIDENCE_TREND: i32 = 80;
const CONFIDENCE_BAND: i32 = 65;
const CONFIDENCE_WAIT: i32 = 40;

/// Deterministic rule engine used whenever the AI collaborator is unreachable
/// or unconfigured. Rules in priority order: trend confluence (EMA200 + Kijun
/// + RSI pullback + MACD momentum), then Bollinger-band touches in a ranging
/// market (ADX below 20), else wait.
///
/// The confidence carries a small random jitter for display variety; every
/// other output is a pure function of the snapshot.
pub fn heuristic_signal(snapshot: &MarketState, timeframe: Timeframe) -> Signal {
    let price = snapshot.price;

    let bullish_trend = price > snapshot.ema200
        && price > snapshot.ichimoku.kijun
        && snapshot.rsi < RSI_PULLBACK_MAX
        && snapshot.macd.histogram > Decimal::ZERO;
    let bearish_trend = price < snapshot.ema200
        && price < snapshot.ichimoku.kijun
        && snapshot.rsi > RSI_RALLY_MIN
        && snapshot.macd.histogram < Decimal::ZERO;

    let (action, base_confidence, reasoning) = if bullish_trend {
        (
            SignalAction::Buy,
            CONFIDENCE_TREND,
            "Price above EMA200 and Kijun with an RSI pullback and positive MACD momentum",
        )
    } else if bearish_trend {
        (
            SignalAction::Sell,
            CONFIDENCE_TREND,
            "Price below EMA200 and Kijun with an overbought RSI and negative MACD momentum",
        )
    } else if snapshot.adx < ADX_RANGING_MAX {
        if price <= snapshot.bollinger.lower {
            (
                SignalAction::Buy,
                CONFIDENCE_BAND,
                "Ranging market (ADX < 20), price at the lower Bollinger band",
            )
        } else if price >= snapshot.bollinger.upper {
            (
                SignalAction::Sell,
                CONFIDENCE_BAND,
                "Ranging market (ADX < 20), price at the upper Bollinger band",
            )
        } else {
            (
                SignalAction::Wait,
                CONFIDENCE_WAIT,
                "Ranging market with price inside the Bollinger bands",
            )
        }
    } else {
        (
            SignalAction::Wait,
            CONFIDENCE_WAIT,
            "Trending market without confluence; waiting for a setup",
        )
    };

    let sl_distance = snapshot.atr * timeframe.sl_multiplier();
    let tp_distance = Decimal::TWO * sl_distance;
    let (stop_loss, take_profit) = match action {
        SignalAction::Buy => (price - sl_distance, price + tp_distance),
        SignalAction::Sell => (price + sl_distance, price - tp_distance),
        _ => (price, price),
    };

    Signal {
        id: Uuid::new_v4(),
        timeframe,
        action,
        confidence: jitter(base_confidence),
        entry_price: price,
        stop_loss,
        take_profit,
        reasoning: reasoning.to_string(),
        source: SignalSource::Heuristic,
        timestamp: Utc::now(),
    }
}

/// Base confidence plus a random ±5, clamped to 0–100.
fn jitter(base: i32) -> u8 {
    let jittered = base + rand::thread_rng().gen_range(-5..=5);
    jittered.clamp(0, 100) as u8
}
