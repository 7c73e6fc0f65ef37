use rust_decimal::Decimal;

/// Simple Moving Average over the last `period` values.
///
/// Falls back to the last value when history is shorter than `period`
/// (zero on an empty slice).
pub fn sma(values: &[Decimal], period: usize) -> Decimal {
    assert!(period > 0, "SMA period must be > 0");
    if values.len() < period {
        return values.last().copied().unwrap_or(Decimal::ZERO);
    }
    let window = &values[values.len() - period..];
    let sum: Decimal = window.iter().sum();
    sum / Decimal::from(period)
}
