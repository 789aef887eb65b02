// Rolling digit-pattern statistics over a bounded tick window.
pub mod even_odd;
pub mod frequency;
pub mod match_differ;
pub mod over_under;
pub mod rise_fall;
pub mod streak;
pub mod summary;
pub mod window;

use crate::config::AnalysisMode;
use crate::domain::Tick;
use crate::models::ModeReport;

/// Runs the classifier for the requested mode over one slice of
/// ticks. Pure; calling it twice on the same slice yields identical
/// reports.
pub fn analyze_mode(mode: AnalysisMode, ticks: &[Tick]) -> ModeReport {
    match mode {
        AnalysisMode::EvenOdd => ModeReport::EvenOdd(even_odd::analyze(ticks)),
        AnalysisMode::OverUnder => ModeReport::OverUnder(over_under::analyze(ticks)),
        AnalysisMode::MatchDiffer => ModeReport::MatchDiffer(match_differ::analyze(ticks)),
        AnalysisMode::RiseFall => ModeReport::RiseFall(rise_fall::analyze(ticks)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn ticks_of(quotes: &[f64]) -> Vec<Tick> {
        quotes
            .iter()
            .enumerate()
            .map(|(i, &q)| Tick::new(i as i64 * 1000, q))
            .collect()
    }

    #[test]
    fn test_every_mode_is_idempotent() {
        let ticks = ticks_of(&[100.02, 100.07, 100.01, 100.07, 100.04]);
        for mode in AnalysisMode::iter() {
            let a = analyze_mode(mode, &ticks);
            let b = analyze_mode(mode, &ticks);
            assert_eq!(a, b, "mode {:?} not idempotent", mode);
        }
    }

    #[test]
    fn test_every_mode_tolerates_empty_input() {
        for mode in AnalysisMode::iter() {
            let report = analyze_mode(mode, &[]);
            assert_eq!(report.mode(), mode);
        }
    }
}
