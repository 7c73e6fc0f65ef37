use goldpulse_core::Stochastic;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Stochastic oscillator over the trailing `period` bars.
///
/// %K = (close − lowestLow) / (highestHigh − lowestLow) · 100; a zero range
/// yields 50. %D is defined equal to %K here; no separate SMA smoothing.
/// Returns {50, 50} when history is shorter than `period`.
pub fn stochastic(
    highs: &[Decimal],
    lows: &[Decimal],
    closes: &[Decimal],
    period: usize,
) -> Stochastic {
    assert!(period > 0, "Stochastic period must be > 0");
    let len = closes.len().min(highs.len()).min(lows.len());
    if len < period {
        return Stochastic {
            k: dec!(50),
            d: dec!(50),
        };
    }

    let highest = highs[len - period..]
        .iter()
        .copied()
        .max()
        .unwrap_or(Decimal::ZERO);
    let lowest = lows[len - period..]
        .iter()
        .copied()
        .min()
        .unwrap_or(Decimal::ZERO);
    let close = closes[len - 1];

    let range = highest - lowest;
    let k = if range.is_zero() {
        dec!(50)
    } else {
        (close - lowest) / range * dec!(100)
    };

    Stochastic { k, d: k }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stochastic_short_history_is_neutral() {
        let highs = [dec!(10), dec!(11)];
        let lows = [dec!(9), dec!(10)];
        let closes = [dec!(9.5), dec!(10.5)];
        let out = stochastic(&highs, &lows, &closes, 14);
        assert_eq!(out.k, dec!(50));
        assert_eq!(out.d, dec!(50));
    }

    #[test]
    fn test_stochastic_close_at_extremes() {
        let highs: Vec<Decimal> = (1..=14).map(|i| Decimal::from(i) + dec!(1)).collect();
        let lows: Vec<Decimal> = (1..=14).map(Decimal::from).collect();
        let mut closes: Vec<Decimal> = (1..=14).map(Decimal::from).collect();

        // Close at the highest high → %K = 100
        closes[13] = dec!(15);
        let out = stochastic(&highs, &lows, &closes, 14);
        assert_eq!(out.k, dec!(100));
        assert_eq!(out.d, out.k);

        // Close at the lowest low → %K = 0
        closes[13] = dec!(1);
        let out = stochastic(&highs, &lows, &closes, 14);
        assert_eq!(out.k, Decimal::ZERO);
    }

    #[test]
    fn test_stochastic_zero_range_guard() {
        let flat = vec![dec!(100); 14];
        let out = stochastic(&flat, &flat, &flat, 14);
        assert_eq!(out.k, dec!(50));
    }
}
