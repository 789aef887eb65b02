use serde::Serialize;

use crate::config::{AnalysisMode, WindowRange};
use crate::domain::Tick;

use super::pattern::{Direction, Parity, PatternSummary, Repeat, Side};
use super::stats::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvenOddReport {
    pub summary: PatternSummary<Parity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverUnderReport {
    pub summary: PatternSummary<Side>,
    /// (min + max) / 2 of the analyzed slice; 0.0 for an empty slice.
    pub midpoint: f64,
    /// Last-digit distribution among Over ticks only, normalized
    /// against the Over bucket total.
    pub over_digits: FrequencyTable,
    pub under_digits: FrequencyTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDifferReport {
    pub summary: PatternSummary<Repeat>,
    /// Distribution of the current (second) digit of each matching
    /// pair, normalized against the Match bucket total.
    pub match_digits: FrequencyTable,
    pub differ_digits: FrequencyTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiseFallReport {
    pub summary: PatternSummary<Direction>,
    /// Distribution of the current digit of each rising transition,
    /// normalized against the Rise bucket total.
    pub rise_digits: FrequencyTable,
    pub fall_digits: FrequencyTable,
}

/// The active classifier's output, one variant per analysis mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ModeReport {
    EvenOdd(EvenOddReport),
    OverUnder(OverUnderReport),
    MatchDiffer(MatchDifferReport),
    RiseFall(RiseFallReport),
}

impl ModeReport {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            ModeReport::EvenOdd(_) => AnalysisMode::EvenOdd,
            ModeReport::OverUnder(_) => AnalysisMode::OverUnder,
            ModeReport::MatchDiffer(_) => AnalysisMode::MatchDiffer,
            ModeReport::RiseFall(_) => AnalysisMode::RiseFall,
        }
    }
}

/// One full recompute handed to the display. A pure projection of the
/// window at the moment it was taken; never mutated, always rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopeSnapshot {
    pub mode: AnalysisMode,
    pub range: WindowRange,
    /// Ticks actually analyzed (≤ the requested range while the
    /// window is still filling).
    pub tick_count: usize,
    pub last_tick: Option<Tick>,
    pub last_digit: Option<u8>,
    pub frequency: FrequencyTable,
    pub report: ModeReport,
}
