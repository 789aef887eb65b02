mod pattern;
mod snapshot;
mod stats;

pub use pattern::{BucketStat, Direction, Parity, PatternSummary, Repeat, Side, Streak};
pub use snapshot::{
    EvenOddReport, MatchDifferReport, ModeReport, OverUnderReport, RiseFallReport, ScopeSnapshot,
};
pub use stats::{DigitStat, FrequencyTable};
