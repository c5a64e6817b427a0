//! Environment wrapper applying a reward shaper.
use crate::RewardShaper;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use stride_core::{
    record::{Record, RecordValue::Scalar},
    Env, Step,
};

/// Configuration of [`ShapedEnv`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ShapedEnvConfig<C, S> {
    /// Configuration of the wrapped environment.
    pub env_config: C,

    /// Configuration of the shaper.
    pub shaper_config: S,
}

impl<C, S> ShapedEnvConfig<C, S> {
    /// Creates a configuration.
    pub fn new(env_config: C, shaper_config: S) -> Self {
        Self {
            env_config,
            shaper_config,
        }
    }
}

/// Wraps an environment and replaces its rewards with shaped ones.
///
/// Each step record gets the keys `raw_reward`, `shaped_reward` and
/// `shaping/<term>` for every term of the shaper. The shaper is reset whenever
/// the environment is.
pub struct ShapedEnv<E, S> {
    env: E,
    shaper: S,
}

impl<E, S> ShapedEnv<E, S>
where
    E: Env,
    S: RewardShaper,
{
    /// Wraps an already built environment.
    pub fn new(env: E, shaper: S) -> Self {
        Self { env, shaper }
    }

    /// The wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// The wrapped environment.
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// The shaper.
    pub fn shaper(&self) -> &S {
        &self.shaper
    }
}

impl<E, S> Env for ShapedEnv<E, S>
where
    E: Env,
    E::Obs: AsRef<[f32]>,
    E::Act: AsRef<[f32]>,
    S: RewardShaper,
{
    type Config = ShapedEnvConfig<E::Config, S::Config>;
    type Obs = E::Obs;
    type Act = E::Act;
    type Info = E::Info;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let env = E::build(&config.env_config, seed)?;
        let shaper = S::build(&config.shaper_config);
        Ok(Self::new(env, shaper))
    }

    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        let (step, mut record) = self.env.step(a)?;
        let shaped = self
            .shaper
            .shape(step.obs.as_ref(), a.as_ref(), step.reward)?;
        let reward = shaped.total();

        record.insert("raw_reward", Scalar(shaped.raw));
        record.insert("shaped_reward", Scalar(reward));
        for (name, value) in shaped.components.iter() {
            record.insert(format!("shaping/{}", name), Scalar(*value));
        }

        let step = Step {
            act: step.act,
            obs: step.obs,
            reward,
            is_terminated: step.is_terminated,
            is_truncated: step.is_truncated,
            info: step.info,
            init_obs: step.init_obs,
        };
        Ok((step, record))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.shaper.reset();
        self.env.reset()
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.shaper.reset();
        self.env.reset_with_index(ix)
    }
}
