//! Fixed-length reception window

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::params::N_PLR;

/// Sliding window of the last N reception outcomes.
///
/// Always holds exactly `capacity` flags: every push evicts the oldest.
/// Starts fully "received" so a newly seen target carries no loss penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceptionWindow {
    flags: VecDeque<bool>,
    capacity: usize,
}

impl ReceptionWindow {
    /// Create a window of `capacity` flags, all received
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            flags: std::iter::repeat(true).take(capacity).collect(),
            capacity,
        }
    }

    /// Record one cycle's outcome, evicting the oldest
    pub fn push(&mut self, received: bool) {
        self.flags.pop_front();
        self.flags.push_back(received);
    }

    /// Fraction of dropped packets in the window
    pub fn loss_ratio(&self) -> f64 {
        self.missed() as f64 / self.capacity as f64
    }

    pub fn missed(&self) -> usize {
        self.flags.iter().filter(|&&received| !received).count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Outcomes, oldest first
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.flags.iter().copied()
    }
}

impl Default for ReceptionWindow {
    fn default() -> Self {
        Self::new(N_PLR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_clean() {
        let window = ReceptionWindow::default();
        assert_eq!(window.len(), N_PLR);
        assert_eq!(window.loss_ratio(), 0.0);
    }

    #[test]
    fn test_length_is_fixed() {
        let mut window = ReceptionWindow::new(4);
        for i in 0..25 {
            window.push(i % 3 == 0);
            assert_eq!(window.len(), 4);
        }
    }

    #[test]
    fn test_loss_ratio_slides() {
        let mut window = ReceptionWindow::new(10);
        for _ in 0..3 {
            window.push(false);
        }
        assert!((window.loss_ratio() - 0.3).abs() < 1e-12);

        // Ten fresh receptions flush every loss out
        for _ in 0..10 {
            window.push(true);
        }
        assert_eq!(window.missed(), 0);
    }

    #[test]
    fn test_oldest_evicted_first() {
        let mut window = ReceptionWindow::new(3);
        window.push(false);
        window.push(true);
        window.push(true);
        assert_eq!(window.iter().collect::<Vec<_>>(), vec![false, true, true]);
        window.push(true);
        assert_eq!(window.iter().collect::<Vec<_>>(), vec![true, true, true]);
    }

    proptest! {
        #[test]
        fn prop_length_and_ratio_hold(
            capacity in 1usize..32,
            pushes in proptest::collection::vec(any::<bool>(), 0..100),
        ) {
            let mut window = ReceptionWindow::new(capacity);
            for received in pushes {
                window.push(received);
                prop_assert_eq!(window.len(), capacity);
                prop_assert!((0.0..=1.0).contains(&window.loss_ratio()));
                prop_assert!(window.missed() <= capacity);
            }
        }
    }
}
