use serde::Serialize;
use strum_macros::Display;

/// Even/Odd classification of a tick's last digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Parity {
    Even,
    Odd,
}

/// Over/Under classification of a quote against the window midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Side {
    Over,
    Under,
}

/// Match/Differ classification of adjacent last digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Repeat {
    Match,
    Differ,
}

/// Rise/Fall classification of adjacent quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Direction {
    Rise,
    Fall,
}

/// Trailing run of identical categories at the end of a sequence.
/// `category` is None only for an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Streak<C> {
    pub category: Option<C>,
    pub length: usize,
}

/// Count and share of one category bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BucketStat<C> {
    pub category: C,
    pub count: usize,
    pub pct: f64,
}

/// The shared output shape of every pattern classifier: two buckets,
/// a dominant-trend label, the trailing streak, and the full category
/// sequence the streak was derived from (arrival order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternSummary<C> {
    /// `buckets[0]` is the lead bucket for the mode (Even, Over,
    /// Match, Rise) and wins exact trend ties.
    pub buckets: [BucketStat<C>; 2],
    /// None only when no categories could be derived (empty or
    /// undersized slice).
    pub trend: Option<C>,
    pub streak: Streak<C>,
    pub categories: Vec<C>,
}

impl<C: Copy> PatternSummary<C> {
    /// Number of classified elements (window length for per-tick
    /// modes, length − 1 for pairwise modes).
    pub fn total(&self) -> usize {
        self.categories.len()
    }
}
