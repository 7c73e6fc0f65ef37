use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Relative Strength Index with Wilder's smoothing, rounded to 2 decimals.
///
/// The first `period` price changes seed the average gain/loss; every later
/// change folds in via `avg = (avg·(p−1) + current) / p`. A zero average loss
/// yields 100 by definition: a flat series is all zero diffs, so avgGain and
/// avgLoss are both zero and the zero-loss rule wins, not 50. Returns 50 when
/// there are fewer than `period + 1` closes.
pub fn rsi(closes: &[Decimal], period: usize) -> Decimal {
    assert!(period > 0, "RSI period must be > 0");
    if closes.len() < period + 1 {
        return dec!(50);
    }

    let period_dec = Decimal::from(period);
    let mut avg_gain = Decimal::ZERO;
    let mut avg_loss = Decimal::ZERO;

    // Seed from the first `period` diffs
    for i in 1..=period {
        let change = closes[i] - closes[i - 1];
        if change > Decimal::ZERO {
            avg_gain += change;
        } else {
            avg_loss += change.abs();
        }
    }
    avg_gain /= period_dec;
    avg_loss /= period_dec;

    // Wilder's smoothing over the remainder
    for i in period + 1..closes.len() {
        let change = closes[i] - closes[i - 1];
        let gain = if change > Decimal::ZERO {
            change
        } else {
            Decimal::ZERO
        };
        let loss = if change < Decimal::ZERO {
            change.abs()
        } else {
            Decimal::ZERO
        };
        avg_gain = (avg_gain * (period_dec - Decimal::ONE) + gain) / period_dec;
        avg_loss = (avg_loss * (period_dec - Decimal::ONE) + loss) / period_dec;
    }

    let value = if avg_loss.is_zero() {
        dec!(100)
    } else {
        let rs = avg_gain / avg_loss;
        dec!(100) - dec!(100) / (Decimal::ONE + rs)
    };
    value.round_dp(2)
}
