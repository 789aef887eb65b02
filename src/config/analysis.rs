//! Operator-settable analysis parameters.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Which pattern classifier drives the active view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, ValueEnum, Default,
)]
pub enum AnalysisMode {
    #[default]
    #[strum(to_string = "Even/Odd")]
    EvenOdd,
    #[strum(to_string = "Over/Under")]
    OverUnder,
    #[strum(to_string = "Match/Differ")]
    MatchDiffer,
    #[strum(to_string = "Rise/Fall")]
    RiseFall,
}

/// How many recent ticks each analysis draws on. A closed set so the
/// buffer can be sized once to the largest choice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, ValueEnum, Default,
)]
pub enum WindowRange {
    #[value(name = "25")]
    R25,
    #[value(name = "50")]
    R50,
    #[default]
    #[value(name = "100")]
    R100,
    #[value(name = "500")]
    R500,
    #[value(name = "1000")]
    R1000,
}

impl WindowRange {
    pub const fn size(self) -> usize {
        match self {
            Self::R25 => 25,
            Self::R50 => 50,
            Self::R100 => 100,
            Self::R500 => 500,
            Self::R1000 => 1000,
        }
    }

    /// The largest selectable range; the tick buffer is sized to this.
    pub const fn max_size() -> usize {
        Self::R1000.size()
    }
}

impl std::fmt::Display for WindowRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.size())
    }
}

/// The live analysis configuration. Both fields can change at any time
/// and take effect on the next recompute; the window itself is never
/// reset by a config change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnalysisConfig {
    pub mode: AnalysisMode,
    pub range: WindowRange,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_buffer_covers_every_range() {
        for range in WindowRange::iter() {
            assert!(range.size() <= WindowRange::max_size());
        }
    }

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.mode, AnalysisMode::EvenOdd);
        assert_eq!(config.range.size(), 100);
    }
}
