use std::collections::VecDeque;

use crate::domain::Tick;

/// Bounded FIFO of the most recent ticks.
///
/// Capacity is fixed at construction and sized to the largest range
/// the operator can request; every analysis call draws its own tail
/// slice, so the displayed range may be smaller than the buffer.
#[derive(Debug, Clone)]
pub struct TickWindow {
    ticks: VecDeque<Tick>,
    capacity: usize,
}

impl TickWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ticks: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends one tick, evicting from the front until the length is
    /// back within capacity.
    pub fn push(&mut self, tick: Tick) {
        self.ticks.push_back(tick);
        while self.ticks.len() > self.capacity {
            self.ticks.pop_front();
        }
    }

    /// The last `range` ticks in arrival order, or everything held if
    /// the window is still shorter than that.
    pub fn tail(&self, range: usize) -> Vec<Tick> {
        let skip = self.ticks.len().saturating_sub(range);
        self.ticks.iter().skip(skip).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<Tick> {
        self.ticks.back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(i: usize) -> Tick {
        Tick::new(i as i64, 100.0 + i as f64 / 100.0)
    }

    #[test]
    fn test_capacity_invariant_under_overflow() {
        let mut window = TickWindow::new(5);
        for i in 0..12 {
            window.push(tick(i));
        }
        assert_eq!(window.len(), 5);
        // The five most recent, original arrival order.
        let quotes: Vec<i64> = window.tail(5).iter().map(|t| t.epoch_ms).collect();
        assert_eq!(quotes, vec![7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_tail_shorter_than_requested() {
        let mut window = TickWindow::new(100);
        for i in 0..3 {
            window.push(tick(i));
        }
        assert_eq!(window.tail(10).len(), 3);
        assert_eq!(window.tail(0).len(), 0);
    }

    #[test]
    fn test_tail_takes_most_recent() {
        let mut window = TickWindow::new(10);
        for i in 0..10 {
            window.push(tick(i));
        }
        let last3: Vec<i64> = window.tail(3).iter().map(|t| t.epoch_ms).collect();
        assert_eq!(last3, vec![7, 8, 9]);
    }

    #[test]
    fn test_last() {
        let mut window = TickWindow::new(4);
        assert!(window.last().is_none());
        window.push(tick(1));
        window.push(tick(2));
        assert_eq!(window.last().map(|t| t.epoch_ms), Some(2));
    }
}
