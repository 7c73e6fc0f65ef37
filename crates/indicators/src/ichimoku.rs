use goldpulse_core::{Candle, CloudStatus, Ichimoku, IchimokuSeries, SeriesPoint};
use rust_decimal::Decimal;

/// Midpoint of the highest high and lowest low over the trailing `period`
/// bars; with shorter history, the midpoint of the last bar alone.
fn hl_midpoint(highs: &[Decimal], lows: &[Decimal], period: usize) -> Decimal {
    let len = highs.len().min(lows.len());
    if len == 0 {
        return Decimal::ZERO;
    }
    if len < period {
        return (highs[len - 1] + lows[len - 1]) / Decimal::TWO;
    }
    let highest = highs[len - period..].iter().copied().max().unwrap();
    let lowest = lows[len - period..].iter().copied().min().unwrap();
    (highest + lowest) / Decimal::TWO
}

/// Scalar Ichimoku: Tenkan(9), Kijun(26), and the Tenkan-vs-Kijun cloud bias.
///
/// `CloudStatus::Inside` is never produced by this comparison; the variant is
/// reserved for a span-membership test against Senkou A/B.
pub fn ichimoku(
    highs: &[Decimal],
    lows: &[Decimal],
    tenkan_period: usize,
    kijun_period: usize,
) -> Ichimoku {
    let tenkan = hl_midpoint(highs, lows, tenkan_period);
    let kijun = hl_midpoint(highs, lows, kijun_period);
    let cloud = if tenkan > kijun {
        CloudStatus::Above
    } else {
        CloudStatus::Below
    };
    Ichimoku {
        tenkan,
        kijun,
        cloud,
    }
}

/// Number of bars the cloud spans are projected forward.
pub const ICHIMOKU_SHIFT: usize = 26;

/// Full Ichimoku chart projection: Tenkan(9), Kijun(26), Senkou Span A
/// ((tenkan + kijun) / 2) and Senkou Span B (HL midpoint over 52), the spans
/// shifted forward by 26 bars.
///
/// Points are only emitted once their window is full, so the lines start at
/// different bars. Shifted timestamps past the last candle are extrapolated
/// with `interval_ms`.
pub fn ichimoku_series(candles: &[Candle], interval_ms: i64) -> IchimokuSeries {
    const TENKAN: usize = 9;
    const KIJUN: usize = 26;
    const SPAN_B: usize = 52;

    let highs: Vec<Decimal> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<Decimal> = candles.iter().map(|c| c.low).collect();
    let shift_ms = ICHIMOKU_SHIFT as i64 * interval_ms;

    let window_mid = |end: usize, period: usize| -> Decimal {
        let window_h = &highs[end + 1 - period..=end];
        let window_l = &lows[end + 1 - period..=end];
        let highest = window_h.iter().copied().max().unwrap();
        let lowest = window_l.iter().copied().min().unwrap();
        (highest + lowest) / Decimal::TWO
    };

    let mut out = IchimokuSeries::default();
    for (i, candle) in candles.iter().enumerate() {
        if i + 1 >= TENKAN {
            out.tenkan.push(SeriesPoint {
                time: candle.time,
                value: window_mid(i, TENKAN),
            });
        }
        if i + 1 >= KIJUN {
            let tenkan = window_mid(i, TENKAN);
            let kijun = window_mid(i, KIJUN);
            out.kijun.push(SeriesPoint {
                time: candle.time,
                value: kijun,
            });
            out.span_a.push(SeriesPoint {
                time: candle.time + shift_ms,
                value: (tenkan + kijun) / Decimal::TWO,
            });
        }
        if i + 1 >= SPAN_B {
            out.span_b.push(SeriesPoint {
                time: candle.time + shift_ms,
                value: window_mid(i, SPAN_B),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn candle(i: i64, high: Decimal, low: Decimal) -> Candle {
        Candle {
            time: i * 60_000,
            open: low,
            high,
            low,
            close: high,
            volume: dec!(1),
        }
    }

    #[test]
    fn test_ichimoku_short_history_uses_last_bar_midpoint() {
        let highs = [dec!(10), dec!(12)];
        let lows = [dec!(6), dec!(8)];
        let out = ichimoku(&highs, &lows, 9, 26);
        assert_eq!(out.tenkan, dec!(10));
        assert_eq!(out.kijun, dec!(10));
        assert_eq!(out.cloud, CloudStatus::Below);
    }

    #[test]
    fn test_ichimoku_uptrend_is_above() {
        // Rising highs/lows: the 9-bar window sits higher than the 26-bar one
        let highs: Vec<Decimal> = (0..30).map(|i| Decimal::from(102 + i)).collect();
        let lows: Vec<Decimal> = (0..30).map(|i| Decimal::from(100 + i)).collect();
        let out = ichimoku(&highs, &lows, 9, 26);
        assert!(out.tenkan > out.kijun);
        assert_eq!(out.cloud, CloudStatus::Above);
    }

    #[test]
    fn test_series_line_start_offsets() {
        let candles: Vec<Candle> = (0..60)
            .map(|i| candle(i, Decimal::from(102 + i), Decimal::from(100 + i)))
            .collect();
        let out = ichimoku_series(&candles, 60_000);

        assert_eq!(out.tenkan.len(), 60 - 8);
        assert_eq!(out.kijun.len(), 60 - 25);
        assert_eq!(out.span_a.len(), 60 - 25);
        assert_eq!(out.span_b.len(), 60 - 51);

        // First tenkan point covers bars 0..=8
        assert_eq!(out.tenkan[0].time, 8 * 60_000);
        assert_eq!(out.tenkan[0].value, (dec!(110) + dec!(100)) / dec!(2));
    }

    #[test]
    fn test_series_spans_are_forward_shifted() {
        let candles: Vec<Candle> = (0..60)
            .map(|i| candle(i, dec!(102), dec!(100)))
            .collect();
        let out = ichimoku_series(&candles, 60_000);

        // Span A's first point sits 26 bars after bar 25
        assert_eq!(out.span_a[0].time, (25 + 26) * 60_000);
        assert_eq!(out.span_b[0].time, (51 + 26) * 60_000);
        // Flat market: every line is the common midpoint
        assert_eq!(out.span_a[0].value, dec!(101));
        assert_eq!(out.span_b[0].value, dec!(101));
    }
}
