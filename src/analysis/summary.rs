use crate::models::{BucketStat, PatternSummary};
use crate::utils::pct_of;

use super::streak::trailing_streak;

/// Folds a category sequence into the shared summary shape.
///
/// `lead` is the mode's first-named bucket (Even, Over, Match, Rise)
/// and wins exact ties for the trend label: `other` must be strictly
/// ahead to take it.
pub(crate) fn summarize<C: Copy + PartialEq>(
    categories: Vec<C>,
    lead: C,
    other: C,
) -> PatternSummary<C> {
    let total = categories.len();
    let lead_count = categories.iter().filter(|&&c| c == lead).count();
    let other_count = total - lead_count;

    let trend = if total == 0 {
        None
    } else if other_count > lead_count {
        Some(other)
    } else {
        Some(lead)
    };

    let streak = trailing_streak(&categories);

    PatternSummary {
        buckets: [
            BucketStat {
                category: lead,
                count: lead_count,
                pct: pct_of(lead_count, total),
            },
            BucketStat {
                category: other,
                count: other_count,
                pct: pct_of(other_count, total),
            },
        ],
        trend,
        streak,
        categories,
    }
}
