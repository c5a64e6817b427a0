#![warn(missing_docs)]
//! A wrapper of [Gymnasium](https://gymnasium.farama.org) environments on Python.
//!
//! [`GymEnv`] drives a gymnasium environment through [`PyO3`](https://github.com/PyO3/pyo3).
//! It is used with `BipedalWalker-v3` and its hardcore variant, but any
//! environment with array observations and continuous actions works.
//!
//! ## Observation
//!
//! Observations are created in Python and converted to Rust objects by a
//! [`GymObsFilter`]. [`ArrayObsFilter`] converts a numpy array into
//! [`ndarray::ArrayD`] and then into the observation type `O` with
//! `From<ArrayD>`.
//!
//! ## Action
//!
//! Actions are created by a [`Policy`] and converted to Python objects by a
//! [`GymActFilter`]. [`ContinuousActFilter`] converts the action into
//! `ArrayD<f32>` and then into a numpy array.
//!
//! [`Policy`]: stride_core::Policy
mod act;
mod base;
mod config;
mod obs;
pub mod util;
pub use act::{ContinuousActFilter, ContinuousActFilterConfig};
pub use base::{GymActFilter, GymEnv, GymInfo, GymObsFilter};
pub use config::GymEnvConfig;
pub use obs::{ArrayObsFilter, ArrayObsFilterConfig};
