//! Wrapper of gymnasium environments implemented in Python.
use crate::GymEnvConfig;
use anyhow::{Context, Result};
use log::{info, trace};
use pyo3::{
    types::{IntoPyDict, PyDict, PyTuple},
    PyObject, Python,
};
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt::Debug, marker::PhantomData, time::Duration};
use stride_core::{record::Record, Act, Env, Info, Obs, Step};

/// Information given at every step of the interaction with the environment.
///
/// Currently, it is empty and used to match the type signature.
pub struct GymInfo {}

impl Info for GymInfo {}

/// Converts [`PyObject`] to [`GymEnv`]`::Obs`.
pub trait GymObsFilter<O: Obs> {
    /// Configuration.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Builds a filter.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Converts a Python object into an observation.
    fn filt(&mut self, obs: PyObject) -> Result<(O, Record)>;

    /// Called when resetting the environment.
    ///
    /// This method is useful for stateful filters.
    fn reset(&mut self, obs: PyObject) -> Result<O> {
        let (obs, _) = self.filt(obs)?;
        Ok(obs)
    }

    /// Returns default configuration.
    fn default_config() -> Self::Config {
        Self::Config::default()
    }
}

/// Converts [`GymEnv`]`::Act` to [`PyObject`].
pub trait GymActFilter<A: Act> {
    /// Configuration.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Builds a filter.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Converts an action into a Python object.
    fn filt(&mut self, act: A) -> (PyObject, Record);

    /// Called when resetting the environment.
    ///
    /// This method is useful for stateful filters.
    fn reset(&mut self) {}

    /// Returns default configuration.
    fn default_config() -> Self::Config {
        Self::Config::default()
    }
}

/// An environment in [Gymnasium](https://gymnasium.farama.org).
pub struct GymEnv<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    env: PyObject,

    render: bool,

    count_steps: usize,

    max_steps: Option<usize>,

    obs_filter: OF,

    act_filter: AF,

    wait: Duration,

    /// Seed given to the next reset.
    ///
    /// It is the seed given to [`Env::build`] at first.
    next_seed: Option<i64>,

    phantom: PhantomData<(O, A)>,
}

impl<O, A, OF, AF> GymEnv<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    /// Sets the maximum number of steps in an episode.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets wait time at every interaction step while rendering.
    pub fn set_wait(&mut self, d: Duration) {
        self.wait = d;
    }

    /// Closes the environment on the Python side.
    pub fn close(&mut self) -> Result<()> {
        Python::with_gil(|py| {
            self.env.call_method0(py, "close")?;
            Ok(())
        })
    }
}

impl<O, A, OF, AF> Env for GymEnv<O, A, OF, AF>
where
    O: Obs,
    A: Act + Debug,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    type Obs = O;
    type Act = A;
    type Info = GymInfo;
    type Config = GymEnvConfig<O, A, OF, AF>;

    /// Resets the environment and returns an observation.
    ///
    /// This method also resets the [`GymObsFilter`] and [`GymActFilter`].
    fn reset(&mut self) -> Result<O> {
        trace!("GymEnv::reset()");
        self.act_filter.reset();
        self.count_steps = 0;

        Python::with_gil(|py| {
            let ret = match self.next_seed.take() {
                Some(seed) => {
                    let kwargs = vec![("seed", seed)].into_py_dict(py);
                    self.env.call_method(py, "reset", (), Some(kwargs))?
                }
                None => self.env.call_method0(py, "reset")?,
            };
            let ret: &PyTuple = ret
                .extract(py)
                .context("reset() must return (obs, info)")?;
            let obs = ret.get_item(0).into();
            self.obs_filter.reset(obs)
        })
    }

    /// Resets the environment with the given index.
    ///
    /// Specifically, `env.reset(seed=ix)` is called in the Python interpreter.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.next_seed = Some(ix as _);
        self.reset()
    }

    /// Runs a step of the environment's dynamics.
    ///
    /// The returned [`Record`] merges the records of the observation and action
    /// filters.
    fn step(&mut self, a: &A) -> Result<(Step<Self>, Record)> {
        trace!("GymEnv::step()");

        Python::with_gil(|py| {
            let (a_py, record_a) = self.act_filter.filt(a.clone());
            let ret = self.env.call_method(py, "step", (a_py,), None)?;
            let step: &PyTuple = ret
                .extract(py)
                .context("step() must return (obs, reward, terminated, truncated, info)")?;
            let (obs, record_o) = self.obs_filter.filt(step.get_item(0).into())?;
            let reward: f32 = step.get_item(1).extract()?;
            let is_terminated: bool = step.get_item(2).extract()?;
            let mut is_truncated: bool = step.get_item(3).extract()?;

            self.count_steps += 1;
            if let Some(max_steps) = self.max_steps {
                if self.count_steps >= max_steps {
                    is_truncated = true;
                }
            }

            if self.render {
                std::thread::sleep(self.wait);
            }

            Ok((
                Step::new(
                    obs,
                    a.clone(),
                    reward,
                    is_terminated,
                    is_truncated,
                    GymInfo {},
                ),
                record_o.merge(record_a),
            ))
        })
    }

    /// Constructs [`GymEnv`].
    ///
    /// * `seed` - The seed of the random number generator, given to the first
    ///   call of the reset method.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let env = Python::with_gil(|py| -> Result<PyObject> {
            // sys.argv is used by pyglet library, which is responsible for rendering.
            // Depending on the python interpreter, however, sys.argv can be empty.
            let locals = vec![("sys", py.import("sys")?)].into_py_dict(py);
            py.eval("sys.argv.insert(0, 'GymEnv')", None, Some(locals))?;
            let ver = py.eval("sys.version", None, Some(locals))?;
            info!("Initialize GymEnv {}", config.name);
            info!("Python version = {}", ver);

            let gym = py
                .import("gymnasium")
                .context("Failed to import gymnasium")?;
            let kwargs = PyDict::new(py);
            if config.hardcore {
                kwargs.set_item("hardcore", true)?;
            }
            if let Some(render_mode) = config.render_mode.as_ref() {
                kwargs.set_item("render_mode", render_mode)?;
            }
            let env = gym
                .getattr("make")?
                .call((config.name.as_str(),), Some(kwargs))
                .with_context(|| format!("Failed to make {}", config.name))?;
            info!("Observation space = {}", env.getattr("observation_space")?);
            info!("Action space = {}", env.getattr("action_space")?);
            Ok(env.into())
        })?;

        Ok(GymEnv {
            env,
            render: config.render_mode.is_some(),
            count_steps: 0,
            max_steps: config.max_steps,
            obs_filter: OF::build(&config.obs_filter_config)?,
            act_filter: AF::build(&config.act_filter_config)?,
            wait: config.wait,
            next_seed: Some(seed),
            phantom: PhantomData,
        })
    }
}
