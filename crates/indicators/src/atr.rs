use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Average True Range: simple mean of the last `period` true ranges.
///
/// TR = max(high − low, |high − prevClose|, |low − prevClose|). This is the
/// unsmoothed variant (a plain mean rather than Wilder's recurrence). Needs
/// `period + 1` bars for the previous-close terms; returns 1 when history is
/// shorter.
pub fn atr(highs: &[Decimal], lows: &[Decimal], closes: &[Decimal], period: usize) -> Decimal {
    assert!(period > 0, "ATR period must be > 0");
    let len = closes.len().min(highs.len()).min(lows.len());
    if len < period + 1 {
        return dec!(1);
    }

    let mut sum = Decimal::ZERO;
    for i in len - period..len {
        let prev_close = closes[i - 1];
        let hl = highs[i] - lows[i];
        let hc = (highs[i] - prev_close).abs();
        let lc = (lows[i] - prev_close).abs();
        sum += hl.max(hc).max(lc);
    }
    sum / Decimal::from(period)
}
