//! Rollout buffer interface.
//!
//! On-policy algorithms optimize on the transitions collected since their last
//! update and throw them away afterwards. The interface is split in two:
//! [`ExperienceBufferBase`] is what the sampler pushes into, and
//! [`RolloutBufferBase`] is what the agent reads from.
use anyhow::Result;

/// Interface for buffers that store experiences from environments.
pub trait ExperienceBufferBase {
    /// The type of items stored in the buffer.
    type Item;

    /// Pushes a new experience into the buffer.
    fn push(&mut self, tr: Self::Item) -> Result<()>;

    /// Returns the current number of experiences in the buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the buffer holds no experience.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Interface for rollout buffers that generate minibatches for training.
pub trait RolloutBufferBase {
    /// Configuration parameters for the buffer.
    type Config: Clone;

    /// The type of minibatch generated for training.
    type Batch;

    /// Builds a new buffer from the given configuration.
    fn build(config: &Self::Config) -> Self;

    /// Returns `true` when the buffer holds a complete rollout.
    fn is_full(&self) -> bool;

    /// Drops all transitions.
    fn clear(&mut self);

    /// Splits the held rollout into shuffled minibatches of `size` transitions.
    ///
    /// The last minibatch may be smaller than `size`.
    fn minibatches(&mut self, size: usize) -> Result<Vec<Self::Batch>>;
}
