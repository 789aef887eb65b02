use itertools::Itertools;

use crate::domain::Tick;
use crate::models::{MatchDifferReport, Repeat};

use super::frequency::from_digits;
use super::summary::summarize;

/// Compares each tick's last digit with its predecessor's: equal is a
/// Match, anything else a Differ. Pairwise, so a window of n ticks
/// yields n - 1 categories (none at all below 2 ticks).
pub fn analyze(ticks: &[Tick]) -> MatchDifferReport {
    let digits: Vec<u8> = ticks.iter().map(|t| t.last_digit()).collect();

    let categories: Vec<Repeat> = digits
        .iter()
        .tuple_windows()
        .map(|(prev, curr)| {
            if prev == curr {
                Repeat::Match
            } else {
                Repeat::Differ
            }
        })
        .collect();

    // Breakdowns count the current digit of each pair, per bucket.
    let match_digits = from_digits(
        digits
            .iter()
            .tuple_windows()
            .filter(|(prev, curr)| prev == curr)
            .map(|(_, &curr)| curr),
    );
    let differ_digits = from_digits(
        digits
            .iter()
            .tuple_windows()
            .filter(|(prev, curr)| prev != curr)
            .map(|(_, &curr)| curr),
    );

    MatchDifferReport {
        summary: summarize(categories, Repeat::Match, Repeat::Differ),
        match_digits,
        differ_digits,
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
    fn test_pairwise_classification() {
        // Digits 4, 4, 7, 7, 7: Match, Differ, Match, Match.
        let ticks = ticks_of(&[100.04, 100.04, 100.07, 100.07, 100.07]);
        let report = analyze(&ticks);
        let s = &report.summary;
        assert_eq!(s.total(), 4);
        assert_eq!(s.buckets[0].count, 3); // Match
        assert_eq!(s.buckets[1].count, 1); // Differ
        assert_eq!(s.buckets[0].pct, 75.0);
        assert_eq!(s.trend, Some(Repeat::Match));
        assert_eq!(s.streak.category, Some(Repeat::Match));
        assert_eq!(s.streak.length, 2);
    }

    #[test]
    fn test_undersized_window_is_neutral() {
        let one = ticks_of(&[100.03]);
        let report = analyze(&one);
        assert_eq!(report.summary.total(), 0);
        assert_eq!(report.summary.trend, None);
        assert_eq!(report.summary.buckets[0].pct, 0.0);

        let report = analyze(&[]);
        assert_eq!(report.summary.total(), 0);
    }

    #[test]
    fn test_breakdown_counts_current_digit() {
        // Digits 4, 4, 9: one match landing on 4, one differ landing on 9.
        let ticks = ticks_of(&[100.04, 100.04, 100.09]);
        let report = analyze(&ticks);
        assert_eq!(report.match_digits.stats[4].count, 1);
        assert_eq!(report.match_digits.total, 1);
        assert_eq!(report.differ_digits.stats[9].count, 1);
        assert_eq!(report.differ_digits.stats[9].pct, 100.0);
    }
}
