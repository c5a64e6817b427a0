//! Environment step.
use super::Env;

/// Extra per-step output of an environment besides the observation.
pub trait Info {}

impl Info for () {}

/// Outcome of one call to [`Env::step`]: the action taken, the resulting
/// observation and reward, and the episode-end flags.
///
/// A [`StepProcessor`] pairs it with the previous observation to make a
/// transition.
pub struct Step<E: Env> {
    /// Action that was taken.
    pub act: E::Act,

    /// Observation after the action.
    pub obs: E::Obs,

    /// Reward.
    pub reward: f32,

    /// The episode reached a terminal state.
    pub is_terminated: bool,

    /// The episode was cut off, e.g. by a time limit.
    pub is_truncated: bool,

    /// Environment specific information.
    pub info: E::Info,

    /// Initial observation of the next episode.
    ///
    /// It is set by [`Env::step_with_reset`] only when the episode ends.
    pub init_obs: Option<E::Obs>,
}

impl<E: Env> Step<E> {
    /// Creates a step without `init_obs`.
    pub fn new(
        obs: E::Obs,
        act: E::Act,
        reward: f32,
        is_terminated: bool,
        is_truncated: bool,
        info: E::Info,
    ) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
            init_obs: None,
        }
    }

    /// Returns `true` if the episode ended, either way.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}

/// Turns [`Step`]s into the items a rollout buffer stores.
///
/// The [`Trainer`](crate::Trainer) pushes the output into a buffer
/// implementing [`ExperienceBufferBase`](crate::ExperienceBufferBase).
pub trait StepProcessor<E: Env> {
    /// Configuration.
    type Config: Clone;

    /// Item pushed into the buffer.
    type Output;

    /// Builds the processor.
    fn build(config: &Self::Config) -> Self;

    /// Resets the object with the first observation of an episode.
    fn reset(&mut self, init_obs: E::Obs);

    /// Makes a buffer item from `step`.
    fn process(&mut self, step: Step<E>) -> Self::Output;
}
