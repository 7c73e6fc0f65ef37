use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Trend strength via Wilder's directional movement.
///
/// Per bar, the larger of the up-move (high − prevHigh) and down-move
/// (prevLow − low) becomes +DM or −DM, and only if positive; ties and
/// non-positive moves contribute nothing. TR, +DM and −DM are smoothed by
/// summing the first `period` bars and then `s = s − s/period + new`.
///
/// Returns the instantaneous DX = 100·|+DI − −DI| / (+DI + −DI) as an ADX
/// approximation, deliberately not double-smoothed. Fallback is 20 with
/// fewer than `2·period` bars; degenerate zero denominators yield 0.
pub fn adx(highs: &[Decimal], lows: &[Decimal], closes: &[Decimal], period: usize) -> Decimal {
    assert!(period > 0, "ADX period must be > 0");
    let len = closes.len().min(highs.len()).min(lows.len());
    if len < 2 * period {
        return dec!(20);
    }

    let period_dec = Decimal::from(period);
    let mut smooth_tr = Decimal::ZERO;
    let mut smooth_plus = Decimal::ZERO;
    let mut smooth_minus = Decimal::ZERO;

    for i in 1..len {
        let up = highs[i] - highs[i - 1];
        let down = lows[i - 1] - lows[i];
        let plus_dm = if up > down && up > Decimal::ZERO {
            up
        } else {
            Decimal::ZERO
        };
        let minus_dm = if down > up && down > Decimal::ZERO {
            down
        } else {
            Decimal::ZERO
        };

        let prev_close = closes[i - 1];
        let tr = (highs[i] - lows[i])
            .max((highs[i] - prev_close).abs())
            .max((lows[i] - prev_close).abs());

        if i <= period {
            smooth_tr += tr;
            smooth_plus += plus_dm;
            smooth_minus += minus_dm;
        } else {
            smooth_tr = smooth_tr - smooth_tr / period_dec + tr;
            smooth_plus = smooth_plus - smooth_plus / period_dec + plus_dm;
            smooth_minus = smooth_minus - smooth_minus / period_dec + minus_dm;
        }
    }

    if smooth_tr.is_zero() {
        return Decimal::ZERO;
    }
    let plus_di = dec!(100) * smooth_plus / smooth_tr;
    let minus_di = dec!(100) * smooth_minus / smooth_tr;

    let di_sum = plus_di + minus_di;
    if di_sum.is_zero() {
        // Both DIs zero: no directional movement at all
        return Decimal::ZERO;
    }
    dec!(100) * (plus_di - minus_di).abs() / di_sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adx_short_history_fallback() {
        let highs = [dec!(10), dec!(10)];
        let lows = [dec!(5), dec!(5)];
        let closes = [dec!(7), dec!(7)];
        assert_eq!(adx(&highs, &lows, &closes, 14), dec!(20));
    }

    #[test]
    fn test_adx_strong_uptrend_is_100() {
        // Highs and lows both rise every bar: all movement is +DM, so
        // +DI > 0, −DI = 0 and DX = 100
        let highs: Vec<Decimal> = (0..30).map(|i| Decimal::from(102 + i)).collect();
        let lows: Vec<Decimal> = (0..30).map(|i| Decimal::from(100 + i)).collect();
        let closes: Vec<Decimal> = (0..30).map(|i| Decimal::from(101 + i)).collect();
        assert_eq!(adx(&highs, &lows, &closes, 14), dec!(100));
    }

    #[test]
    fn test_adx_flat_series_degenerate_zero() {
        let flat = vec![dec!(100); 30];
        assert_eq!(adx(&flat, &flat, &flat, 14), Decimal::ZERO);
    }

    #[test]
    fn test_adx_in_range() {
        let highs: Vec<Decimal> = (0..30)
            .map(|i| dec!(102) + Decimal::from(i % 3))
            .collect();
        let lows: Vec<Decimal> = (0..30)
            .map(|i| dec!(100) - Decimal::from(i % 2))
            .collect();
        let closes: Vec<Decimal> = (0..30).map(|_| dec!(101)).collect();
        let value = adx(&highs, &lows, &closes, 14);
        assert!(value >= Decimal::ZERO && value <= dec!(100));
    }
}
