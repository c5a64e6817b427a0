use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Bounded history of the two legs' contact flags.
///
/// Holds the most recent `capacity` pairs; older ones are dropped. Gait
/// statistics are taken over the last `window` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactHistory {
    capacity: usize,
    window: usize,
    pairs: VecDeque<(f32, f32)>,
}

/// Counts of contact patterns in a window of [`ContactHistory`].
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub struct ContactCounts {
    /// Steps where exactly one foot touches the ground.
    pub single: usize,

    /// Steps where both feet touch the ground.
    pub both: usize,

    /// Steps where no foot touches the ground.
    pub none: usize,
}

impl Default for ContactHistory {
    fn default() -> Self {
        Self::new(20, 10)
    }
}

impl ContactHistory {
    /// Creates an empty history holding up to `capacity` pairs.
    ///
    /// `window` is clipped to `capacity`.
    pub fn new(capacity: usize, window: usize) -> Self {
        Self {
            capacity,
            window: window.min(capacity),
            pairs: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends a pair of contact flags.
    pub fn push(&mut self, left: f32, right: f32) {
        if self.capacity == 0 {
            return;
        }
        if self.pairs.len() == self.capacity {
            self.pairs.pop_front();
        }
        self.pairs.push_back((left, right));
    }

    /// Number of pairs held.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pair is held.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Maximum number of pairs held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops all pairs.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// The last `window` pairs, oldest first, or `None` while fewer are held.
    pub fn window(&self) -> Option<impl Iterator<Item = &(f32, f32)>> {
        if self.window == 0 || self.pairs.len() < self.window {
            return None;
        }
        Some(self.pairs.iter().skip(self.pairs.len() - self.window))
    }

    /// Counts contact patterns over the window.
    pub fn counts(&self) -> Option<ContactCounts> {
        self.window().map(|pairs| {
            pairs.fold(ContactCounts::default(), |mut c, &(l, r)| {
                match (l > 0.0, r > 0.0) {
                    (true, true) => c.both += 1,
                    (true, false) | (false, true) => c.single += 1,
                    _ if l == 0.0 && r == 0.0 => c.none += 1,
                    _ => {}
                }
                c
            })
        })
    }

    /// Rewards alternating single support over the window.
    ///
    /// `(single - both - 2 * none) / window`, or `0` while the window is not
    /// filled.
    pub fn alternation_score(&self) -> f32 {
        match self.counts() {
            Some(c) => {
                let w = self.window as f32;
                c.single as f32 / w - (c.both as f32 + 2.0 * c.none as f32) / w
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut history = ContactHistory::new(3, 2);
        for i in 0..5 {
            history.push(i as f32, 0.0);
        }
        assert_eq!(history.len(), 3);
        let lefts: Vec<f32> = history.window().unwrap().map(|p| p.0).collect();
        assert_eq!(lefts, vec![3.0, 4.0]);

        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 3);
    }

    #[test]
    fn test_no_score_before_window_is_filled() {
        let mut history = ContactHistory::default();
        for _ in 0..9 {
            history.push(1.0, 0.0);
        }
        assert!(history.window().is_none());
        assert_eq!(history.alternation_score(), 0.0);

        history.push(0.0, 1.0);
        assert!((history.alternation_score() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_alternation_score() {
        let mut history = ContactHistory::default();
        // 6 single, 2 both, 2 none
        for _ in 0..3 {
            history.push(1.0, 0.0);
            history.push(0.0, 1.0);
        }
        history.push(1.0, 1.0);
        history.push(1.0, 1.0);
        history.push(0.0, 0.0);
        history.push(0.0, 0.0);

        let counts = history.counts().unwrap();
        assert_eq!(
            counts,
            ContactCounts {
                single: 6,
                both: 2,
                none: 2
            }
        );
        assert!((history.alternation_score() - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_old_pairs_leave_the_window() {
        let mut history = ContactHistory::default();
        for _ in 0..20 {
            history.push(0.0, 0.0);
        }
        assert!((history.alternation_score() + 2.0).abs() < 1e-6);
        for _ in 0..10 {
            history.push(1.0, 0.0);
        }
        assert_eq!(history.len(), 20);
        assert!((history.alternation_score() - 1.0).abs() < 1e-6);
    }
}
