use crate::models::Streak;

/// Trailing run of identical categories at the end of a sequence.
/// Empty input returns the none sentinel with length 0.
pub fn trailing_streak<C: Copy + PartialEq>(categories: &[C]) -> Streak<C> {
    let Some(&last) = categories.last() else {
        return Streak {
            category: None,
            length: 0,
        };
    };

    let length = categories.iter().rev().take_while(|&&c| c == last).count();
    Streak {
        category: Some(last),
        length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Parity::{Even, Odd};

    #[test]
    fn test_streak_basic() {
        // Trailing run of 3 Evens.
        let cats = [Even, Even, Odd, Even, Even, Even];
        let streak = trailing_streak(&cats);
        assert_eq!(streak.category, Some(Even));
        assert_eq!(streak.length, 3);
    }

    #[test]
    fn test_streak_empty() {
        let empty: [crate::models::Parity; 0] = [];
        let streak = trailing_streak(&empty);
        assert_eq!(streak.category, None);
        assert_eq!(streak.length, 0);
    }

    #[test]
    fn test_streak_whole_sequence() {
        let cats = [Odd, Odd, Odd];
        let streak = trailing_streak(&cats);
        assert_eq!(streak.category, Some(Odd));
        assert_eq!(streak.length, 3);
    }

    #[test]
    fn test_streak_single() {
        let streak = trailing_streak(&[Even]);
        assert_eq!(streak.category, Some(Even));
        assert_eq!(streak.length, 1);
    }
}
