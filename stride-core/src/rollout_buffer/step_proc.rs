//! A generic implementation of [`StepProcessor`](crate::StepProcessor).
use super::Transition;
use crate::{Env, Step, StepProcessor};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Configuration of [`SimpleStepProcessor`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SimpleStepProcessorConfig {}

/// Makes [`Transition`]s from [`Step`]s, keeping the previous observation.
///
/// At the end of an episode the previous observation is replaced by
/// [`Step::init_obs`], the first observation of the next episode.
pub struct SimpleStepProcessor<E: Env> {
    prev_obs: Option<E::Obs>,
    phantom: PhantomData<E>,
}

impl<E: Env> StepProcessor<E> for SimpleStepProcessor<E> {
    type Config = SimpleStepProcessorConfig;
    type Output = Transition<E::Obs, E::Act>;

    fn build(_config: &Self::Config) -> Self {
        Self {
            prev_obs: None,
            phantom: PhantomData,
        }
    }

    fn reset(&mut self, init_obs: E::Obs) {
        self.prev_obs = Some(init_obs);
    }

    /// Processes a step.
    ///
    /// # Panics
    ///
    /// Panics if [`StepProcessor::reset`] has not been called before the first step.
    fn process(&mut self, step: Step<E>) -> Self::Output {
        let obs = self
            .prev_obs
            .take()
            .expect("SimpleStepProcessor::reset() must be called first");
        let is_done = step.is_done();
        self.prev_obs = match (is_done, step.init_obs) {
            (true, Some(init_obs)) => Some(init_obs),
            _ => Some(step.obs.clone()),
        };

        Transition {
            obs,
            act: step.act,
            next_obs: step.obs,
            reward: step.reward,
            is_terminated: step.is_terminated,
            is_truncated: step.is_truncated,
        }
    }
}
