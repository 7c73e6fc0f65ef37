use crate::sma::sma;
use goldpulse_core::Bollinger;
use rust_decimal::Decimal;

/// Bollinger Bands over the last `period` closes.
///
/// Middle band is the SMA; upper/lower are `mult` population standard
/// deviations away (variance divided by `period`, not `period − 1`). With
/// fewer than `period` closes all three bands collapse onto the last close.
pub fn bollinger(closes: &[Decimal], period: usize, mult: Decimal) -> Bollinger {
    assert!(period > 0, "Bollinger period must be > 0");
    if closes.len() < period {
        let last = closes.last().copied().unwrap_or(Decimal::ZERO);
        return Bollinger {
            upper: last,
            middle: last,
            lower: last,
        };
    }

    let middle = sma(closes, period);
    let window = &closes[closes.len() - period..];
    let variance: Decimal = window
        .iter()
        .map(|v| {
            let diff = *v - middle;
            diff * diff
        })
        .sum::<Decimal>()
        / Decimal::from(period);
    let sd = decimal_sqrt(variance);

    Bollinger {
        upper: middle + mult * sd,
        middle,
        lower: middle - mult * sd,
    }
}

/// Newton's method square root for Decimal.
pub fn decimal_sqrt(value: Decimal) -> Decimal {
    if value.is_zero() || value < Decimal::ZERO {
        return Decimal::ZERO;
    }
    let mut guess = value / Decimal::TWO;
    let epsilon = Decimal::new(1, 10); // 0.0000000001
    for _ in 0..100 {
        let next_guess = (guess + value / guess) / Decimal::TWO;
        let diff = (next_guess - guess).abs();
        guess = next_guess;
        if diff < epsilon {
            break;
        }
    }
    guess
}
