//! These tests need a Python interpreter with `gymnasium[box2d]` installed.
use anyhow::Result;
use ndarray::ArrayD;
use stride_core::{Act, Env, Obs};
use stride_py_gym_env::{
    ArrayObsFilter, ArrayObsFilterConfig, ContinuousActFilter, GymEnv, GymEnvConfig,
};

#[derive(Clone, Debug)]
struct TestObs(ArrayD<f32>);

impl Obs for TestObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<ArrayD<f32>> for TestObs {
    fn from(v: ArrayD<f32>) -> Self {
        Self(v)
    }
}

#[derive(Clone, Debug)]
struct TestAct(Vec<f32>);

impl Act for TestAct {}

impl From<TestAct> for ArrayD<f32> {
    fn from(a: TestAct) -> Self {
        ndarray::Array1::from(a.0).into_dyn()
    }
}

type ObsFilter = ArrayObsFilter<f32, f32, TestObs>;
type ActFilter = ContinuousActFilter<TestAct>;
type Walker = GymEnv<TestObs, TestAct, ObsFilter, ActFilter>;

fn config(hardcore: bool) -> GymEnvConfig<TestObs, TestAct, ObsFilter, ActFilter> {
    GymEnvConfig::default()
        .hardcore(hardcore)
        .obs_filter_config(ArrayObsFilterConfig { record_obs: true })
}

#[test]
#[ignore]
fn test_bipedal_walker_steps() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut env = Walker::build(&config(false), 42)?;
    let obs = env.reset()?;
    assert_eq!(obs.len(), 24);

    let (step, record) = env.step(&TestAct(vec![0.0; 4]))?;
    assert_eq!(step.obs.len(), 24);
    assert_eq!(record.get_array1("obs")?.len(), 24);
    env.close()?;
    Ok(())
}

#[test]
#[ignore]
fn test_max_steps_truncates() -> Result<()> {
    let config = config(true).max_steps(Some(3));
    let mut env = Walker::build(&config, 0)?;
    env.reset_with_index(7)?;
    let act = TestAct(vec![0.0; 4]);
    let mut n = 0;
    loop {
        let (step, _) = env.step(&act)?;
        n += 1;
        if step.is_done() {
            break;
        }
    }
    assert!(n <= 3);
    Ok(())
}
