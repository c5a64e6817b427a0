//! Small deterministic environment, policy and agent used in tests.
use crate::{
    record::{Record, RecordValue},
    rollout_buffer::SimpleRolloutBuffer,
    Act, Agent, Env, Obs, Policy, RolloutBufferBase, Step,
};
use anyhow::Result;
use std::{fs, path::Path};

/// Observation of [`CountdownEnv`]: the number of steps left in the episode.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyObs(pub f32);

impl Obs for DummyObs {
    fn len(&self) -> usize {
        1
    }
}

/// Action ignored by [`CountdownEnv`].
#[derive(Clone, Debug, PartialEq)]
pub struct DummyAct(pub f32);

impl Act for DummyAct {}

/// Configuration of [`CountdownEnv`].
#[derive(Clone, Debug)]
pub struct CountdownEnvConfig {
    /// Steps per episode.
    pub episode_len: usize,

    /// Reward of every step.
    pub reward: f32,
}

impl Default for CountdownEnvConfig {
    fn default() -> Self {
        Self {
            episode_len: 10,
            reward: 1.0,
        }
    }
}

impl CountdownEnvConfig {
    /// Sets the episode length.
    pub fn episode_len(mut self, v: usize) -> Self {
        self.episode_len = v;
        self
    }

    /// Sets the reward per step.
    pub fn reward(mut self, v: f32) -> Self {
        self.reward = v;
        self
    }
}

/// An environment whose episodes truncate after a fixed number of steps.
pub struct CountdownEnv {
    config: CountdownEnvConfig,
    left: usize,
}

impl Env for CountdownEnv {
    type Config = CountdownEnvConfig;
    type Obs = DummyObs;
    type Act = DummyAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            left: config.episode_len,
        })
    }

    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        self.left = self.left.saturating_sub(1);
        let step = Step::new(
            DummyObs(self.left as f32),
            a.clone(),
            self.config.reward,
            false,
            self.left == 0,
            (),
        );
        Ok((step, Record::empty()))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.left = self.config.episode_len;
        Ok(DummyObs(self.left as f32))
    }

    fn reset_with_index(&mut self, _ix: usize) -> Result<Self::Obs> {
        self.reset()
    }
}

/// Always returns the same action.
#[derive(Default)]
pub struct ConstPolicy {
    /// Action value.
    pub value: f32,
}

impl Policy<CountdownEnv> for ConstPolicy {
    fn sample(&mut self, _obs: &DummyObs) -> DummyAct {
        DummyAct(self.value)
    }
}

/// Rollout buffer used with [`CountingAgent`].
pub type DummyRolloutBuffer = SimpleRolloutBuffer<DummyObs, DummyAct>;

/// An agent that counts its optimization steps instead of learning.
///
/// [`CountdownEnv`] ignores actions, so every evaluation of this agent gives
/// the same return.
#[derive(Default)]
pub struct CountingAgent {
    /// Number of optimization steps.
    pub n_opts: usize,

    /// Sizes of the rollouts handed to the agent.
    pub rollout_sizes: Vec<usize>,

    /// Values given to [`Agent::set_progress_remaining`].
    pub progress: Vec<f64>,

    /// Training mode.
    pub train: bool,
}

impl Policy<CountdownEnv> for CountingAgent {
    fn sample(&mut self, _obs: &DummyObs) -> DummyAct {
        DummyAct(self.n_opts as f32)
    }
}

impl Agent<CountdownEnv, DummyRolloutBuffer> for CountingAgent {
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn opt_with_record(&mut self, buffer: &mut DummyRolloutBuffer) -> Record {
        self.n_opts += 1;
        self.rollout_sizes.push(buffer.transitions().len());
        let _ = buffer.minibatches(4);
        Record::from_slice(&[("n_opts", RecordValue::Scalar(self.n_opts as _))])
    }

    fn set_progress_remaining(&mut self, progress_remaining: f64) {
        self.progress.push(progress_remaining);
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        fs::write(path.join("n_opts.txt"), self.n_opts.to_string())?;
        Ok(())
    }

    fn load_params(&mut self, path: &Path) -> Result<()> {
        self.n_opts = fs::read_to_string(path.join("n_opts.txt"))?.trim().parse()?;
        Ok(())
    }
}
