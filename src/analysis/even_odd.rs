use crate::domain::Tick;
use crate::models::{EvenOddReport, Parity};

use super::summary::summarize;

/// Classifies each tick's last digit as Even or Odd.
pub fn analyze(ticks: &[Tick]) -> EvenOddReport {
    let categories: Vec<Parity> = ticks
        .iter()
        .map(|t| {
            if t.last_digit() % 2 == 0 {
                Parity::Even
            } else {
                Parity::Odd
            }
        })
        .collect();

    EvenOddReport {
        summary: summarize(categories, Parity::Even, Parity::Odd),
    }
}
