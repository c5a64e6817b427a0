//! Agent.
use super::{Env, Policy, RolloutBufferBase};
use crate::record::Record;
use anyhow::Result;
use std::path::Path;

/// Represents a trainable policy on an environment.
///
/// The learning algorithm itself lives outside of this crate. The
/// [`Trainer`](crate::Trainer) only fills the rollout buffer, calls
/// [`Agent::opt_with_record`] when the buffer is full and saves the agent.
pub trait Agent<E: Env, R: RolloutBufferBase>: Policy<E> {
    /// Set the policy to training mode.
    fn train(&mut self);

    /// Set the policy to evaluation mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Performs an optimization step.
    ///
    /// `buffer` is the rollout buffer holding the transitions collected since
    /// the last optimization step.
    fn opt(&mut self, buffer: &mut R) {
        let _ = self.opt_with_record(buffer);
    }

    /// Performs an optimization step and returns some information.
    fn opt_with_record(&mut self, buffer: &mut R) -> Record;

    /// Notifies the agent of the remaining fraction of training, from 1 to 0.
    ///
    /// Agents evaluating a [`Schedule`](crate::Schedule), e.g. for the learning
    /// rate, use this value as its argument.
    #[allow(unused_variables)]
    fn set_progress_remaining(&mut self, progress_remaining: f64) {}

    /// Save the parameters of the agent in the given directory.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Load the parameters of the agent from the given directory.
    fn load_params(&mut self, path: &Path) -> Result<()>;
}
