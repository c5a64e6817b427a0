//! Hyperparameter schedules.
use serde::{Deserialize, Serialize};

/// A value that changes over the course of training.
///
/// The argument of [`Schedule::value`] is the remaining fraction of training,
/// going from `1.0` at the start down to `0.0` at the end.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub enum Schedule {
    /// Always the same value.
    Constant(f64),

    /// Decays linearly from `initial` to zero.
    LinearDecay {
        /// Value at the start of training.
        initial: f64,
    },
}

impl Schedule {
    /// Returns the value of the schedule.
    ///
    /// `progress_remaining` is clamped into `[0, 1]`.
    pub fn value(&self, progress_remaining: f64) -> f64 {
        let p = progress_remaining.clamp(0.0, 1.0);
        match self {
            Self::Constant(v) => *v,
            Self::LinearDecay { initial } => initial * p,
        }
    }
}

impl From<f64> for Schedule {
    fn from(v: f64) -> Self {
        Self::Constant(v)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_linear_decay() {
        let s = Schedule::LinearDecay { initial: 2.5e-4 };
        assert_eq!(s.value(1.0), 2.5e-4);
        assert!((s.value(0.5) - 1.25e-4).abs() < 1e-12);
        assert_eq!(s.value(0.0), 0.0);
        assert_eq!(s.value(-0.1), 0.0);
    }

    #[test]
    fn test_constant() {
        let s: Schedule = 3e-4.into();
        assert_eq!(s.value(0.3), 3e-4);
    }
}
