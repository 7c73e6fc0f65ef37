use rust_decimal::Decimal;

/// Exponential Moving Average series, same length as the input.
///
/// Smoothing constant k = 2 / (period + 1); seeded with the first value, so
/// `out[0] == values[0]` exactly and every input index has an output.
pub fn ema_series(values: &[Decimal], period: usize) -> Vec<Decimal> {
    assert!(period > 0, "EMA period must be > 0");
    let mut out = Vec::with_capacity(values.len());
    let k = Decimal::TWO / (Decimal::from(period) + Decimal::ONE);
    let mut prev: Option<Decimal> = None;
    for &value in values {
        let next = match prev {
            None => value,
            Some(p) => value * k + p * (Decimal::ONE - k),
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// Latest EMA value (zero on an empty slice).
pub fn ema(values: &[Decimal], period: usize) -> Decimal {
    ema_series(values, period)
        .last()
        .copied()
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ema_series_length_and_seed() {
        let values = [dec!(2), dec!(4), dec!(6), dec!(8)];
        let series = ema_series(&values, 3);
        assert_eq!(series.len(), values.len());
        assert_eq!(series[0], values[0]);
    }

    #[test]
    fn test_ema_recurrence() {
        // period 3 → k = 0.5
        let series = ema_series(&[dec!(2), dec!(4)], 3);
        assert_eq!(series[1], dec!(3));

        let series = ema_series(&[dec!(2), dec!(4), dec!(8)], 3);
        assert_eq!(series[2], dec!(5.5));
    }

    #[test]
    fn test_ema_empty() {
        assert!(ema_series(&[], 14).is_empty());
        assert_eq!(ema(&[], 14), Decimal::ZERO);
    }
}
