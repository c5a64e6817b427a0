//! Core functionalities.
mod agent;
mod env;
mod policy;
mod rollout_buffer;
mod step;
pub use agent::Agent;
pub use env::Env;
pub use policy::Policy;
pub use rollout_buffer::{ExperienceBufferBase, RolloutBufferBase};
use std::fmt::Debug;
pub use step::{Info, Step, StepProcessor};

/// An observation of an environment.
///
/// Vectorized environments are not supported, so an object of this trait
/// always holds the observation of a single environment.
pub trait Obs: Clone + Debug {
    /// Returns the number of elements in the observation.
    fn len(&self) -> usize;

    /// Returns `true` if the observation has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An action on an environment.
pub trait Act: Clone + Debug {}
