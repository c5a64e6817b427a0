//! Observation filters.
use crate::{util::pyobj_to_arrayd, GymObsFilter};
use anyhow::Result;
use ndarray::ArrayD;
use num_traits::AsPrimitive;
use numpy::Element;
use pyo3::{PyObject, Python};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, marker::PhantomData};
use stride_core::{
    record::{Record, RecordValue},
    Obs,
};

/// Configuration of [`ArrayObsFilter`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArrayObsFilterConfig {
    /// Adds the observation to the step record as `obs` if `true`.
    pub record_obs: bool,
}

/// Converts a numpy array of `T1` into an observation via [`ArrayD`]`<T2>`.
///
/// `O` must implement [`From`]`<ArrayD<T2>>`.
pub struct ArrayObsFilter<T1, T2, O> {
    config: ArrayObsFilterConfig,
    phantom: PhantomData<(T1, T2, O)>,
}

impl<T1, T2, O> GymObsFilter<O> for ArrayObsFilter<T1, T2, O>
where
    T1: Element + AsPrimitive<T2>,
    T2: 'static + Copy + Debug + AsPrimitive<f32>,
    O: Obs + From<ArrayD<T2>>,
{
    type Config = ArrayObsFilterConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            phantom: PhantomData,
        })
    }

    fn filt(&mut self, obs: PyObject) -> Result<(O, Record)> {
        let obs = Python::with_gil(|py| pyobj_to_arrayd::<T1, T2>(obs.as_ref(py)))?;
        let record = match self.config.record_obs {
            true => {
                let vec = obs.iter().map(|x| x.as_()).collect();
                Record::from_slice(&[("obs", RecordValue::Array1(vec))])
            }
            false => Record::empty(),
        };
        Ok((obs.into(), record))
    }
}
