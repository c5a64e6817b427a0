use super::SimpleRolloutBufferConfig;
use crate::{ExperienceBufferBase, RolloutBufferBase};
use anyhow::{bail, Result};

/// A transition `(o_t, a_t, o_t+1, r_t)` with episode-end flags.
#[derive(Debug, Clone)]
pub struct Transition<O, A> {
    /// Observation the action was taken on.
    pub obs: O,

    /// Action.
    pub act: A,

    /// Observation after the action.
    pub next_obs: O,

    /// Reward.
    pub reward: f32,

    /// The episode reached a terminal state.
    pub is_terminated: bool,

    /// The episode was cut off, e.g. by a time limit.
    pub is_truncated: bool,
}

/// Holds the transitions of one rollout in the order they were collected.
pub struct SimpleRolloutBuffer<O, A> {
    n_steps: usize,
    transitions: Vec<Transition<O, A>>,
    rng: fastrand::Rng,
}

impl<O, A> SimpleRolloutBuffer<O, A> {
    /// Transitions in collection order.
    pub fn transitions(&self) -> &[Transition<O, A>] {
        &self.transitions
    }

    /// Takes all transitions out of the buffer, leaving it empty.
    pub fn drain(&mut self) -> Vec<Transition<O, A>> {
        std::mem::take(&mut self.transitions)
    }
}

impl<O, A> ExperienceBufferBase for SimpleRolloutBuffer<O, A> {
    type Item = Transition<O, A>;

    fn push(&mut self, tr: Self::Item) -> Result<()> {
        if self.transitions.len() >= self.n_steps {
            bail!(
                "Rollout buffer is full ({} transitions), clear it before pushing",
                self.n_steps
            );
        }
        self.transitions.push(tr);
        Ok(())
    }

    fn len(&self) -> usize {
        self.transitions.len()
    }
}

impl<O: Clone, A: Clone> RolloutBufferBase for SimpleRolloutBuffer<O, A> {
    type Config = SimpleRolloutBufferConfig;
    type Batch = Vec<Transition<O, A>>;

    fn build(config: &Self::Config) -> Self {
        Self {
            n_steps: config.n_steps,
            transitions: Vec::with_capacity(config.n_steps),
            rng: fastrand::Rng::with_seed(config.seed),
        }
    }

    fn is_full(&self) -> bool {
        self.transitions.len() >= self.n_steps
    }

    fn clear(&mut self) {
        self.transitions.clear();
    }

    fn minibatches(&mut self, size: usize) -> Result<Vec<Self::Batch>> {
        if size == 0 {
            bail!("Minibatch size must be positive");
        }
        let mut ixs: Vec<usize> = (0..self.transitions.len()).collect();
        self.rng.shuffle(&mut ixs);

        Ok(ixs
            .chunks(size)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|&i| self.transitions[i].clone())
                    .collect()
            })
            .collect())
    }
}
