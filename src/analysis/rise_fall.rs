use itertools::Itertools;

use crate::domain::Tick;
use crate::models::{Direction, RiseFallReport};

use super::frequency::from_digits;
use super::summary::summarize;

// A strictly higher quote is a Rise; everything else, equal quotes
// included, is a Fall. The same rule feeds the totals, the streak,
// and the digit breakdown, so the denominator is always n - 1.
fn classify(prev: f64, curr: f64) -> Direction {
    if curr > prev {
        Direction::Rise
    } else {
        Direction::Fall
    }
}

/// Compares each quote with its predecessor. Pairwise, so a window of
/// n ticks yields n - 1 categories (none at all below 2 ticks).
pub fn analyze(ticks: &[Tick]) -> RiseFallReport {
    let categories: Vec<Direction> = ticks
        .iter()
        .tuple_windows()
        .map(|(prev, curr)| classify(prev.quote, curr.quote))
        .collect();

    let rise_digits = from_digits(
        ticks
            .iter()
            .tuple_windows()
            .filter(|(prev, curr)| classify(prev.quote, curr.quote) == Direction::Rise)
            .map(|(_, curr)| curr.last_digit()),
    );
    let fall_digits = from_digits(
        ticks
            .iter()
            .tuple_windows()
            .filter(|(prev, curr)| classify(prev.quote, curr.quote) == Direction::Fall)
            .map(|(_, curr)| curr.last_digit()),
    );

    RiseFallReport {
        summary: summarize(categories, Direction::Rise, Direction::Fall),
        rise_digits,
        fall_digits,
    }
}
