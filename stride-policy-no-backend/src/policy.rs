use crate::{Mat, Mlp};
use anyhow::{bail, Context, Result};
use log::info;
use std::{marker::PhantomData, path::Path};
use stride_core::{Env, Policy};

/// A deterministic policy computing actions with an [`Mlp`].
///
/// The observation is fed to the MLP as a column vector and the output
/// becomes the action, so actions are in `[-1, 1]`.
pub struct MlpPolicy<E> {
    mlp: Mlp,
    phantom: PhantomData<E>,
}

impl<E> MlpPolicy<E> {
    /// Wraps an MLP.
    pub fn new(mlp: Mlp) -> Self {
        Self {
            mlp,
            phantom: PhantomData,
        }
    }

    /// Loads the MLP from a file serialized with bincode.
    pub fn from_serialized_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mlp = Mlp::load(path)
            .with_context(|| format!("Failed to load policy from {:?}", path))?;
        info!(
            "Loaded MLP policy ({} -> {}) from {:?}",
            mlp.in_dim(),
            mlp.out_dim(),
            path
        );
        Ok(Self::new(mlp))
    }

    /// Fails unless the MLP maps `obs_dim` inputs to `act_dim` outputs.
    ///
    /// [`Policy::sample`] cannot report errors, so call this on a loaded
    /// policy before running it on an environment.
    pub fn check_dims(&self, obs_dim: usize, act_dim: usize) -> Result<()> {
        let (in_dim, out_dim) = (self.mlp.in_dim(), self.mlp.out_dim());
        if (in_dim, out_dim) != (obs_dim, act_dim) {
            bail!(
                "Policy maps {} inputs to {} outputs, the environment needs {} to {}",
                in_dim,
                out_dim,
                obs_dim,
                act_dim
            );
        }
        Ok(())
    }

    /// The MLP.
    pub fn mlp(&self) -> &Mlp {
        &self.mlp
    }
}

impl<E> Policy<E> for MlpPolicy<E>
where
    E: Env,
    E::Obs: AsRef<[f32]>,
    E::Act: From<Vec<f32>>,
{
    /// # Panics
    ///
    /// Panics if the observation length differs from [`Mlp::in_dim`], see
    /// [`MlpPolicy::check_dims`].
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let x: Mat = obs.as_ref().to_vec().into();
        self.mlp.forward(&x).data.into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use stride_core::{DefaultEvaluator, Evaluator};
    use tempdir::TempDir;

    mod vec_env {
        use anyhow::Result;
        use stride_core::{record::Record, Act, Env, Obs, Step};

        #[derive(Clone, Debug)]
        pub struct VecObs(pub Vec<f32>);

        impl Obs for VecObs {
            fn len(&self) -> usize {
                self.0.len()
            }
        }

        impl AsRef<[f32]> for VecObs {
            fn as_ref(&self) -> &[f32] {
                &self.0
            }
        }

        #[derive(Clone, Debug)]
        pub struct VecAct(pub Vec<f32>);

        impl Act for VecAct {}

        impl From<Vec<f32>> for VecAct {
            fn from(v: Vec<f32>) -> Self {
                Self(v)
            }
        }

        /// Rewards the first action element, one step per episode.
        pub struct OneStepEnv;

        impl Env for OneStepEnv {
            type Config = ();
            type Obs = VecObs;
            type Act = VecAct;
            type Info = ();

            fn build(_config: &(), _seed: i64) -> Result<Self> {
                Ok(Self)
            }

            fn step(&mut self, a: &VecAct) -> Result<(Step<Self>, Record)> {
                let step = Step::new(VecObs(vec![1.0, 1.0]), a.clone(), a.0[0], true, false, ());
                Ok((step, Record::empty()))
            }

            fn reset(&mut self) -> Result<VecObs> {
                Ok(VecObs(vec![1.0, 1.0]))
            }

            fn reset_with_index(&mut self, _ix: usize) -> Result<VecObs> {
                self.reset()
            }
        }
    }
    use vec_env::{OneStepEnv, VecAct, VecObs};

    fn identity_mlp() -> Mlp {
        Mlp::new(
            vec![Mat::new(vec![1.0, 0.0, 0.0, 1.0], vec![2, 2])],
            vec![Mat::new(vec![0.0, 0.0], vec![2, 1])],
        )
        .unwrap()
    }

    #[test]
    fn test_sample() {
        let mut policy = MlpPolicy::<OneStepEnv>::new(identity_mlp());
        let act: VecAct = policy.sample(&VecObs(vec![0.5, -10.0]));
        assert!((act.0[0] - 0.5f32.tanh()).abs() < 1e-6);
        assert!((act.0[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_evaluate_loaded_policy() -> Result<()> {
        let dir = TempDir::new("mlp_policy")?;
        let path = dir.path().join("mlp.bincode");
        identity_mlp().save(&path)?;

        let mut policy = MlpPolicy::<OneStepEnv>::from_serialized_path(&path)?;
        let mut evaluator = DefaultEvaluator::<OneStepEnv, _>::new(&(), 0, 3)?;
        let record = evaluator.evaluate(&mut policy)?;
        let expected = 1f32.tanh();
        assert!((record.get_scalar("episode_return_mean")? - expected).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_check_dims() -> Result<()> {
        let dir = TempDir::new("mlp_policy")?;
        let path = dir.path().join("mlp.bincode");
        Mlp::new(
            vec![Mat::new(vec![0.0; 6], vec![2, 3])],
            vec![Mat::new(vec![0.0; 2], vec![2, 1])],
        )?
        .save(&path)?;

        let policy = MlpPolicy::<OneStepEnv>::from_serialized_path(&path)?;
        let err = match policy.check_dims(2, 2) {
            Ok(()) => panic!("a 3-input policy must not pass for 2-dim observations"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("3 inputs"));
        assert!(policy.check_dims(3, 2).is_ok());
        assert!(policy.check_dims(3, 1).is_err());
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = match MlpPolicy::<OneStepEnv>::from_serialized_path("no/such/mlp.bincode") {
            Ok(_) => panic!("loading a missing file must fail"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("Failed to load policy"));
    }
}
