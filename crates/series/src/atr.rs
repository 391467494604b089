use primitives::Price;

use crate::bar::Bar;

/// Bars per ATR window (20 true-range samples)
pub const ATR_WINDOW: usize = 21;

/// True Range of one bar.
///
/// The prior-close terms are taken as signed differences, not absolute values:
/// `max(high - low, prev_close - high, prev_close - low)`.
pub fn true_range(prev_close: Price, bar: &Bar) -> Price {
    let hl = bar.high.0 - bar.low.0;
    let ch = prev_close.0 - bar.high.0;
    let cl = prev_close.0 - bar.low.0;

    Price(hl.max(ch).max(cl))
}

/// Simple ATR (SMA) over a slice: mean of the true ranges of bars 1..len
pub fn atr(bars: &[Bar]) -> Option<Price> {
    if bars.len() < 2 {
        return None;
    }

    let mut sum = 0.0;

    for i in 1..bars.len() {
        let tr = true_range(bars[i - 1].close, &bars[i]);
        sum += tr.0;
    }

    Some(Price(sum / (bars.len() as f64 - 1.0)))
}

/// Full recomputation of `atr` for every bar.
/// Bars 0..=20 get 0, later bars get the ATR of the 21-bar window ending at them.
pub fn recompute_atr(bars: &mut [Bar]) {
    for i in 0..bars.len() {
        let value = if i < ATR_WINDOW {
            Price(0.0)
        } else {
            atr(&bars[i + 1 - ATR_WINDOW..=i]).unwrap_or_default()
        };
        bars[i].atr = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::RawBar;

    fn bar(ts: i64, high: f64, low: f64, close: f64) -> Bar {
        Bar::from_raw(&RawBar::from((ts, low, high, low, close, 1.0, 1)))
    }

    #[test]
    fn true_range_keeps_sign_of_prior_close_terms() {
        // gap up: the absolute-value formula would give 5.0
        let b = bar(1, 15.0, 14.0, 14.5);
        assert_eq!(true_range(Price(10.0), &b), Price(1.0));

        // gap down: prev_close - low dominates
        let b = bar(1, 9.0, 8.0, 8.5);
        assert_eq!(true_range(Price(12.0), &b), Price(4.0));
    }

    #[test]
    fn atr_needs_two_bars() {
        assert_eq!(atr(&[]), None);
        assert_eq!(atr(&[bar(1, 2.0, 1.0, 1.5)]), None);
    }

    #[test]
    fn warm_up_bars_are_zero() {
        let mut bars: Vec<Bar> = (0..21).map(|i| bar(i, 100.0 + i as f64, 1.0, 50.0)).collect();
        for b in bars.iter_mut() {
            b.atr = Price(7.0);
        }
        recompute_atr(&mut bars);
        assert!(bars.iter().all(|b| b.atr == Price(0.0)));
    }

    #[test]
    fn steady_range_gives_constant_atr() {
        let mut bars: Vec<Bar> = (0..30).map(|i| bar(i, 12.0, 10.0, 11.0)).collect();
        recompute_atr(&mut bars);

        assert_eq!(bars[20].atr, Price(0.0));
        for b in &bars[21..] {
            assert_eq!(b.atr, Price(2.0));
        }
    }

    #[test]
    fn window_covers_twenty_samples() {
        // only bar 21 has a wider range; bar 21 averages it with 19 steady samples
        let mut bars: Vec<Bar> = (0..22).map(|i| bar(i, 12.0, 10.0, 11.0)).collect();
        bars[21] = bar(21, 32.0, 10.0, 11.0);
        recompute_atr(&mut bars);

        let expected = (19.0 * 2.0 + 22.0) / 20.0;
        assert!((bars[21].atr.0 - expected).abs() < 1e-12);
    }
}
