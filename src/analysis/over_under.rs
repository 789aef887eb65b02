use argminmax::ArgMinMax;

use crate::domain::Tick;
use crate::models::{OverUnderReport, Side};

use super::frequency::from_digits;
use super::summary::summarize;

/// Classifies each quote against the midpoint of the analyzed slice:
/// strictly above is Over, everything else (midpoint included) is
/// Under. The midpoint is (min + max) / 2 of the same slice.
pub fn analyze(ticks: &[Tick]) -> OverUnderReport {
    if ticks.is_empty() {
        return OverUnderReport {
            summary: summarize(Vec::new(), Side::Over, Side::Under),
            midpoint: 0.0,
            over_digits: from_digits([]),
            under_digits: from_digits([]),
        };
    }

    let quotes: Vec<f64> = ticks.iter().map(|t| t.quote).collect();
    let (min_idx, max_idx) = quotes.argminmax();
    let midpoint = (quotes[min_idx] + quotes[max_idx]) / 2.0;

    let categories: Vec<Side> = quotes
        .iter()
        .map(|&q| if q > midpoint { Side::Over } else { Side::Under })
        .collect();

    let over_digits = from_digits(
        ticks
            .iter()
            .filter(|t| t.quote > midpoint)
            .map(|t| t.last_digit()),
    );
    let under_digits = from_digits(
        ticks
            .iter()
            .filter(|t| t.quote <= midpoint)
            .map(|t| t.last_digit()),
    );

    OverUnderReport {
        summary: summarize(categories, Side::Over, Side::Under),
        midpoint,
        over_digits,
        under_digits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_of(quotes: &[f64]) -> Vec<Tick> {
        quotes
            .iter()
            .enumerate()
            .map(|(i, &q)| Tick::new(i as i64, q))
            .collect()
    }

    #[test]
    fn test_midpoint_split() {
        // min 10, max 40, midpoint 25: Under, Under, Over, Over.
        let ticks = ticks_of(&[10.0, 20.0, 30.0, 40.0]);
        let report = analyze(&ticks);
        assert_eq!(report.midpoint, 25.0);
        assert_eq!(report.summary.buckets[0].count, 2); // Over
        assert_eq!(report.summary.buckets[1].count, 2); // Under
        // Exact tie resolves to the first-named bucket.
        assert_eq!(report.summary.trend, Some(Side::Over));
    }

    #[test]
    fn test_quote_on_midpoint_is_under() {
        // min 10, max 30, midpoint 20: the 20.0 tick is Under.
        let ticks = ticks_of(&[10.0, 20.0, 30.0]);
        let report = analyze(&ticks);
        assert_eq!(report.summary.categories[1], Side::Under);
        assert_eq!(report.summary.buckets[1].count, 2);
    }

    #[test]
    fn test_bucket_digit_breakdown_normalizes_locally() {
        // Digits: 100.02 -> 2 (under), 100.04 -> 4 (under),
        // 101.06 -> 6 (over), 101.08 -> 8 (over); midpoint 100.55.
        let ticks = ticks_of(&[100.02, 100.04, 101.06, 101.08]);
        let report = analyze(&ticks);
        assert_eq!(report.over_digits.total, 2);
        assert_eq!(report.over_digits.stats[6].pct, 50.0);
        assert_eq!(report.under_digits.total, 2);
        assert_eq!(report.under_digits.stats[2].pct, 50.0);
        // Digit absent from a bucket stays at zero there.
        assert_eq!(report.over_digits.stats[2].count, 0);
    }

    #[test]
    fn test_empty_window() {
        let report = analyze(&[]);
        assert_eq!(report.midpoint, 0.0);
        assert_eq!(report.summary.trend, None);
        assert_eq!(report.over_digits.total, 0);
    }

    #[test]
    fn test_flat_window_is_all_under() {
        // min == max, so no quote is strictly above the midpoint.
        let ticks = ticks_of(&[50.0, 50.0, 50.0]);
        let report = analyze(&ticks);
        assert_eq!(report.summary.buckets[1].count, 3);
        assert_eq!(report.summary.trend, Some(Side::Under));
    }
}
