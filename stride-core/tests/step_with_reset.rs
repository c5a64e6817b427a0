use anyhow::Result;
use stride_core::{
    dummy::{CountdownEnv, CountdownEnvConfig, DummyAct, DummyObs},
    Env,
};

#[test]
fn test_step_with_reset_sets_init_obs_on_episode_end() -> Result<()> {
    let config = CountdownEnvConfig::default().episode_len(2);
    let mut env = CountdownEnv::build(&config, 0)?;
    assert_eq!(env.reset()?, DummyObs(2.0));

    let (step, _) = env.step_with_reset(&DummyAct(0.0))?;
    assert!(!step.is_done());
    assert!(step.init_obs.is_none());

    let (step, _) = env.step_with_reset(&DummyAct(0.0))?;
    assert!(step.is_truncated);
    assert!(!step.is_terminated);
    assert_eq!(step.obs, DummyObs(0.0));
    assert_eq!(step.init_obs, Some(DummyObs(2.0)));
    Ok(())
}
