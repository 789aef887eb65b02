use std::array;

use crate::domain::Tick;
use crate::models::{DigitStat, FrequencyTable};
use crate::utils::pct_of;

/// Builds the digit frequency table for a slice of ticks.
pub fn digit_frequency(ticks: &[Tick]) -> FrequencyTable {
    from_digits(ticks.iter().map(|t| t.last_digit()))
}

/// Builds a frequency table from raw digits. Used directly by the
/// per-bucket breakdowns, which normalize each bucket against its own
/// total rather than the whole window.
pub fn from_digits<I>(digits: I) -> FrequencyTable
where
    I: IntoIterator<Item = u8>,
{
    let mut counts = [0usize; 10];
    let mut total = 0usize;
    for d in digits {
        counts[usize::from(d % 10)] += 1;
        total += 1;
    }

    let stats = array::from_fn(|i| DigitStat {
        digit: i as u8,
        count: counts[i],
        pct: pct_of(counts[i], total),
    });

    FrequencyTable { stats, total }
}
