/// Rounds to 2 decimal places (display-stable percentages).
#[inline]
fn round2(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}

/// Percentage of `count` within `total`, rounded to 2 decimals.
/// An empty total divides by 1 instead, so the result is 0.0 rather
/// than NaN.
#[inline]
pub(crate) fn pct_of(count: usize, total: usize) -> f64 {
    round2(count as f64 * 100.0 / total.max(1) as f64)
}
