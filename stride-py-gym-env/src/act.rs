//! Action filters.
use crate::{util::arrayd_to_pyobj, GymActFilter};
use anyhow::Result;
use ndarray::ArrayD;
use pyo3::{PyObject, Python};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use stride_core::{
    record::{Record, RecordValue},
    Act,
};

/// Configuration of [`ContinuousActFilter`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContinuousActFilterConfig {
    /// Adds the action to the step record as `act` if `true`.
    pub record_act: bool,
}

/// Converts a continuous action into a numpy array of `f32`.
///
/// `A` must implement `Into<ArrayD<f32>>`.
#[derive(Clone, Debug)]
pub struct ContinuousActFilter<A> {
    config: ContinuousActFilterConfig,
    phantom: PhantomData<A>,
}

impl<A> GymActFilter<A> for ContinuousActFilter<A>
where
    A: Act + Into<ArrayD<f32>>,
{
    type Config = ContinuousActFilterConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            phantom: PhantomData,
        })
    }

    fn filt(&mut self, act: A) -> (PyObject, Record) {
        let act: ArrayD<f32> = act.into();
        let record = match self.config.record_act {
            true => Record::from_slice(&[(
                "act",
                RecordValue::Array1(act.iter().cloned().collect()),
            )]),
            false => Record::empty(),
        };
        let act = Python::with_gil(|py| arrayd_to_pyobj(py, &act));
        (act, record)
    }
}
