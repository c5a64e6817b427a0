//! Observation and action of the walker.
use ndarray::{Array1, ArrayD};
use stride_core::{Act, Obs};

/// Length of [`WalkerObs`].
pub const OBS_DIM: usize = 24;

/// Length of [`WalkerAct`].
pub const ACT_DIM: usize = 4;

/// Observation of the walker, a flat vector of [`OBS_DIM`] elements.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkerObs(pub Vec<f32>);

impl Obs for WalkerObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<ArrayD<f32>> for WalkerObs {
    fn from(obs: ArrayD<f32>) -> Self {
        Self(obs.iter().cloned().collect())
    }
}

impl AsRef<[f32]> for WalkerObs {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

/// Torques of the [`ACT_DIM`] joints, each in `[-1, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkerAct(pub Vec<f32>);

impl Act for WalkerAct {}

impl From<WalkerAct> for ArrayD<f32> {
    fn from(act: WalkerAct) -> Self {
        Array1::from(act.0).into_dyn()
    }
}

impl From<Vec<f32>> for WalkerAct {
    fn from(v: Vec<f32>) -> Self {
        Self(v)
    }
}

impl AsRef<[f32]> for WalkerAct {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}
