//! Configuration of [`SimpleRolloutBuffer`](super::SimpleRolloutBuffer).
use serde::{Deserialize, Serialize};

/// Configuration of [`SimpleRolloutBuffer`](super::SimpleRolloutBuffer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct SimpleRolloutBufferConfig {
    /// Number of transitions in a complete rollout.
    pub n_steps: usize,

    /// Seed of the generator shuffling minibatches.
    pub seed: u64,
}

impl Default for SimpleRolloutBufferConfig {
    fn default() -> Self {
        Self {
            n_steps: 2048,
            seed: 42,
        }
    }
}

impl SimpleRolloutBufferConfig {
    /// Sets the rollout length.
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = n_steps;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
