use goldpulse_core::PivotPoints;
use rust_decimal::Decimal;

/// Classic floor pivots from a single bar (typically the latest).
///
/// pivot = (H + L + C) / 3; r1 = 2·pivot − L; s1 = 2·pivot − H;
/// r2 = pivot + (H − L); s2 = pivot − (H − L). For any `high >= low` the
/// levels order as `s2 <= s1 <= pivot <= r1 <= r2`.
pub fn pivot_points(high: Decimal, low: Decimal, close: Decimal) -> PivotPoints {
    let pivot = (high + low + close) / Decimal::from(3);
    let range = high - low;
    PivotPoints {
        pivot,
        r1: Decimal::TWO * pivot - low,
        s1: Decimal::TWO * pivot - high,
        r2: pivot + range,
        s2: pivot - range,
    }
}
