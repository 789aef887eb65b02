use serde::{Deserialize, Serialize};

use super::digit::last_digit;

/// One market quote observation, arrival-ordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Server timestamp in epoch milliseconds.
    pub epoch_ms: i64,
    pub quote: f64,
}

impl Tick {
    pub fn new(epoch_ms: i64, quote: f64) -> Self {
        Self { epoch_ms, quote }
    }

    /// The window only ever holds finite quotes. Anything else is
    /// rejected at the feed boundary before it gets here.
    pub fn is_valid(&self) -> bool {
        self.quote.is_finite()
    }

    #[inline]
    pub fn last_digit(&self) -> u8 {
        last_digit(self.quote)
    }
}
