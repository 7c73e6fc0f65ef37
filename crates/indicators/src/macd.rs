use crate::ema::ema_series;
use goldpulse_core::Macd;
use rust_decimal::Decimal;

/// MACD (Moving Average Convergence Divergence), taken at the last bar.
///
/// The MACD line is EMA(fast) − EMA(slow) computed pointwise over the full
/// close series; the signal line is an EMA of that difference series.
/// Returns all-zero components when there are fewer than `slow` closes.
pub fn macd(closes: &[Decimal], fast: usize, slow: usize, signal_period: usize) -> Macd {
    assert!(fast < slow, "fast period must be less than slow period");
    if closes.len() < slow {
        return Macd::NEUTRAL;
    }

    let fast_line = ema_series(closes, fast);
    let slow_line = ema_series(closes, slow);
    let macd_line: Vec<Decimal> = fast_line
        .iter()
        .zip(&slow_line)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_series(&macd_line, signal_period);

    let macd = *macd_line.last().unwrap();
    let signal = *signal_line.last().unwrap();
    Macd {
        macd,
        signal,
        histogram: macd - signal,
    }
}
