//! End-to-end snapshot checks: known candle histories in, exact indicator
//! values out of the full analyzer pipeline.

use goldpulse_core::{Candle, CloudStatus, Timeframe};
use goldpulse_engine::Analyzer;
use goldpulse_indicators::decimal_sqrt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn flat_candle(i: i64, price: Decimal) -> Candle {
    Candle {
        time: i * 60_000,
        open: price,
        high: price,
        low: price,
        close: price,
        volume: dec!(1),
    }
}

#[test]
fn flat_history_hits_rsi_zero_loss_rule() {
    // 20 identical closes: every diff is zero → avgLoss == 0 → RSI = 100.
    // The degenerate rule, not a "neutral" 50.
    let mut analyzer = Analyzer::new(Timeframe::M1, 300);
    let history: Vec<Candle> = (0..20).map(|i| flat_candle(i, dec!(100))).collect();
    let state = analyzer.load_history(history).unwrap();
    assert_eq!(state.rsi, dec!(100));
}

#[test]
fn two_bars_return_adx_fallback() {
    let mut analyzer = Analyzer::new(Timeframe::M1, 300);
    let history = vec![
        Candle {
            time: 0,
            open: dec!(6),
            high: dec!(10),
            low: dec!(5),
            close: dec!(7),
            volume: dec!(1),
        },
        Candle {
            time: 60_000,
            open: dec!(7),
            high: dec!(10),
            low: dec!(5),
            close: dec!(7),
            volume: dec!(1),
        },
    ];
    let state = analyzer.load_history(history).unwrap();
    assert_eq!(state.adx, dec!(20));
}

#[test]
fn ascending_closes_match_bollinger_formula() {
    // closes 1..30 → window 11..30, middle = 20.5, population sd, mult 2
    let mut analyzer = Analyzer::new(Timeframe::M1, 300);
    let history: Vec<Candle> = (1..=30)
        .map(|i| flat_candle(i, Decimal::from(i)))
        .collect();
    let state = analyzer.load_history(history).unwrap();

    assert_eq!(state.bollinger.middle, dec!(20.5));
    let sd = decimal_sqrt(dec!(33.25));
    assert!((state.bollinger.upper - (dec!(20.5) + dec!(2) * sd)).abs() < dec!(0.0001));
    assert!((state.bollinger.lower - (dec!(20.5) - dec!(2) * sd)).abs() < dec!(0.0001));
}

#[test]
fn single_bar_pivot_levels() {
    let mut analyzer = Analyzer::new(Timeframe::M1, 300);
    let state = analyzer
        .load_history(vec![Candle {
            time: 0,
            open: dec!(2648),
            high: dec!(2655),
            low: dec!(2645),
            close: dec!(2650),
            volume: dec!(100),
        }])
        .unwrap();

    assert_eq!(state.pivots.pivot, dec!(2650));
    assert_eq!(state.pivots.r1, dec!(2655));
    assert_eq!(state.pivots.s1, dec!(2645));
    assert_eq!(state.pivots.r2, dec!(2660));
    assert_eq!(state.pivots.s2, dec!(2640));
}

#[test]
fn warm_up_snapshot_is_structurally_complete() {
    // A single bar must still produce every field, via the fallbacks.
    let mut analyzer = Analyzer::new(Timeframe::M1, 300);
    let state = analyzer
        .load_history(vec![Candle {
            time: 0,
            open: dec!(2648),
            high: dec!(2655),
            low: dec!(2645),
            close: dec!(2650),
            volume: dec!(100),
        }])
        .unwrap();

    assert_eq!(state.rsi, dec!(50));
    assert_eq!(state.adx, dec!(20));
    assert_eq!(state.atr, dec!(1));
    assert_eq!(state.stochastic.k, dec!(50));
    assert_eq!(state.macd.histogram, Decimal::ZERO);
    // Bollinger collapses onto the close, Ichimoku onto the bar midpoint
    assert_eq!(state.bollinger.middle, dec!(2650));
    assert_eq!(state.ichimoku.tenkan, dec!(2650));
    assert_eq!(state.ichimoku.kijun, dec!(2650));
    assert_eq!(state.ichimoku.cloud, CloudStatus::Below);
    assert_eq!(state.ema200, dec!(2650));
}

#[test]
fn oscillators_stay_bounded_over_a_noisy_session() {
    let mut analyzer = Analyzer::new(Timeframe::M5, 300);
    let history: Vec<Candle> = (0..60)
        .map(|i| {
            let base = dec!(2600) + Decimal::from((i * 7) % 13) - Decimal::from((i * 3) % 5);
            Candle {
                time: i * 300_000,
                open: base,
                high: base + dec!(3),
                low: base - dec!(3),
                close: base + dec!(1),
                volume: dec!(5),
            }
        })
        .collect();
    let mut state = analyzer.load_history(history).unwrap();

    for i in 60..90 {
        let base = dec!(2600) + Decimal::from((i * 11) % 17);
        state = analyzer.on_candle(Candle {
            time: i * 300_000,
            open: base,
            high: base + dec!(4),
            low: base - dec!(2),
            close: base + dec!(2),
            volume: dec!(5),
        });

        assert!(state.rsi >= Decimal::ZERO && state.rsi <= dec!(100));
        assert!(state.stochastic.k >= Decimal::ZERO && state.stochastic.k <= dec!(100));
        assert!(state.adx >= Decimal::ZERO && state.adx <= dec!(100));
        assert!(state.bollinger.lower <= state.bollinger.middle);
        assert!(state.bollinger.middle <= state.bollinger.upper);
        assert!(state.pivots.s2 <= state.pivots.s1 && state.pivots.r1 <= state.pivots.r2);
    }
}

#[test]
fn ichimoku_projection_uses_timeframe_interval() {
    let mut analyzer = Analyzer::new(Timeframe::M5, 300);
    let history: Vec<Candle> = (0..60)
        .map(|i| flat_candle(i * 5, dec!(2600)))
        .collect();
    analyzer.load_history(history);

    let projection = analyzer.ichimoku_projection();
    assert!(!projection.span_b.is_empty());
    // Span A is shifted 26 bars past bar 25 on the 5-minute grid
    assert_eq!(projection.span_a[0].time, (25 + 26) * 300_000);
}
