//! Configuration of [`GymEnv`](super::GymEnv).
use crate::{GymActFilter, GymObsFilter};
use std::{marker::PhantomData, time::Duration};
use stride_core::{Act, Obs};

/// Configuration of [`GymEnv`](super::GymEnv).
pub struct GymEnvConfig<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    /// Name of the environment passed to `gymnasium.make()`.
    pub name: String,

    /// Passes `hardcore=True` to `gymnasium.make()` if `true`.
    pub hardcore: bool,

    /// Passed to `gymnasium.make()` as `render_mode`.
    pub render_mode: Option<String>,

    /// Truncates episodes after this number of steps.
    pub max_steps: Option<usize>,

    /// Wait time at every step while rendering.
    pub wait: Duration,

    /// Configuration of the observation filter.
    pub obs_filter_config: OF::Config,

    /// Configuration of the action filter.
    pub act_filter_config: AF::Config,

    phantom: PhantomData<(O, A)>,
}

impl<O, A, OF, AF> Clone for GymEnvConfig<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            hardcore: self.hardcore,
            render_mode: self.render_mode.clone(),
            max_steps: self.max_steps,
            wait: self.wait,
            obs_filter_config: self.obs_filter_config.clone(),
            act_filter_config: self.act_filter_config.clone(),
            phantom: PhantomData,
        }
    }
}

impl<O, A, OF, AF> Default for GymEnvConfig<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    fn default() -> Self {
        Self {
            name: "BipedalWalker-v3".to_string(),
            hardcore: false,
            render_mode: None,
            max_steps: None,
            wait: Duration::from_millis(0),
            obs_filter_config: OF::default_config(),
            act_filter_config: AF::default_config(),
            phantom: PhantomData,
        }
    }
}

impl<O, A, OF, AF> GymEnvConfig<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    /// Sets the name of the environment.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Selects the hardcore variant of the environment.
    pub fn hardcore(mut self, v: bool) -> Self {
        self.hardcore = v;
        self
    }

    /// Sets the render mode, e.g. `"human"`.
    pub fn render_mode(mut self, render_mode: Option<String>) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the wait time at every step while rendering.
    pub fn wait(mut self, v: Duration) -> Self {
        self.wait = v;
        self
    }

    /// Sets the observation filter config.
    pub fn obs_filter_config(mut self, v: OF::Config) -> Self {
        self.obs_filter_config = v;
        self
    }

    /// Sets the action filter config.
    pub fn act_filter_config(mut self, v: AF::Config) -> Self {
        self.act_filter_config = v;
        self
    }
}
