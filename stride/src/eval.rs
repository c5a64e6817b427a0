//! Replays a trained policy.
use crate::{walker_env_config, ShapedWalkerEnv, Terrain, ACT_DIM, OBS_DIM};
use anyhow::{bail, Context, Result};
use log::info;
use serde::Serialize;
use std::{
    fs::File,
    path::{Path, PathBuf},
    time::Duration,
};
use stride_core::{
    record::{BufferedRecorder, Record},
    DefaultEvaluator, EpisodeSummary, Env, Policy,
};
use stride_policy_no_backend::MlpPolicy;
use stride_shaping::{ShapedEnvConfig, ShaperConfig};

/// File name of the exported actor network in a model directory.
pub const ACTOR_FILE: &str = "mlp.bincode";

/// Policy replayed in evaluation.
pub type WalkerPolicy = MlpPolicy<ShapedWalkerEnv>;

/// Configuration of [`evaluate`].
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Serialized actor network.
    pub model_path: PathBuf,

    /// Terrain of the walker.
    pub terrain: Terrain,

    /// Shaper applied to the rewards.
    pub shaper: ShaperConfig,

    /// Number of episodes.
    pub n_episodes: usize,

    /// Shows the episodes in a window.
    pub render: bool,

    /// Wait time at every step while rendering.
    pub wait: Duration,

    /// Writes every step to this CSV file if set.
    pub trace_path: Option<PathBuf>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            model_path: Path::new("models").join("best").join(ACTOR_FILE),
            terrain: Terrain::Flat,
            shaper: ShaperConfig::Identity,
            n_episodes: 5,
            render: true,
            wait: Duration::from_millis(0),
            trace_path: None,
        }
    }
}

/// A row of the step trace.
#[derive(Debug, Serialize)]
struct TraceRow {
    episode: usize,
    step: usize,
    reward: f32,
    raw_reward: f32,
}

impl TraceRow {
    fn try_from_record(record: &Record) -> Result<Self> {
        let reward = record.get_scalar("reward")?;
        Ok(Self {
            episode: record.get_scalar("episode")? as _,
            step: record.get_scalar("step")? as _,
            reward,
            raw_reward: record.get_scalar("raw_reward").unwrap_or(reward),
        })
    }
}

/// Loads the policy at `path`.
///
/// The network must map walker observations to walker actions.
pub fn load_policy(path: impl AsRef<Path>) -> Result<WalkerPolicy> {
    let path = path.as_ref();
    if !path.exists() {
        bail!("model file not found at {:?}, run training", path);
    }
    let policy = WalkerPolicy::from_serialized_path(path)?;
    policy
        .check_dims(OBS_DIM, ACT_DIM)
        .with_context(|| format!("{:?} is not a walker policy", path))?;
    Ok(policy)
}

fn write_trace(path: &Path, recorder: &BufferedRecorder) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut wtr = csv::Writer::from_writer(file);
    for record in recorder.iter() {
        wtr.serialize(TraceRow::try_from_record(record)?)?;
    }
    wtr.flush()?;
    info!("Wrote step trace to {:?}", path);
    Ok(())
}

/// Runs episodes with a trained policy and prints the return of each one.
pub fn evaluate(config: &EvalConfig) -> Result<Vec<EpisodeSummary>> {
    let mut policy = load_policy(&config.model_path)?;
    let env_config = ShapedEnvConfig::new(
        walker_env_config(config.terrain, config.render, config.wait),
        config.shaper.clone(),
    );
    let env = ShapedWalkerEnv::build(&env_config, 0)?;
    evaluate_with(env, &mut policy, config)
}

/// Runs episodes of `env` with `policy` and prints the return of each one.
pub fn evaluate_with<E, P>(
    env: E,
    policy: &mut P,
    config: &EvalConfig,
) -> Result<Vec<EpisodeSummary>>
where
    E: Env,
    P: Policy<E>,
{
    let mut evaluator = DefaultEvaluator::<E, P>::from_env(env, config.n_episodes)?;
    let summaries = match config.trace_path.as_ref() {
        Some(path) => {
            let mut recorder = BufferedRecorder::new();
            let summaries = evaluator.run_episodes(policy, Some(&mut recorder))?;
            write_trace(path, &recorder)?;
            summaries
        }
        None => evaluator.run_episodes(policy, None)?,
    };

    for (i, summary) in summaries.iter().enumerate() {
        println!("ep {}'s reward is {}", i + 1, summary.episode_return);
    }
    Ok(summaries)
}

#[cfg(test)]
mod test {
    use super::*;
    use stride_core::dummy::{ConstPolicy, CountdownEnv, CountdownEnvConfig};
    use stride_policy_no_backend::{Mat, Mlp};
    use tempdir::TempDir;

    #[test]
    fn test_missing_model() {
        let err = match load_policy("no/such/dir/mlp.bincode") {
            Ok(_) => panic!("loading a missing model must fail"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("run training"));
    }

    fn save_mlp(path: &Path, in_dim: usize, out_dim: usize) -> Result<()> {
        let w = Mat::new(vec![0.0; in_dim * out_dim], vec![out_dim as _, in_dim as _]);
        let b = Mat::new(vec![0.0; out_dim], vec![out_dim as _, 1]);
        Mlp::new(vec![w], vec![b])?.save(path)
    }

    #[test]
    fn test_policy_of_other_env() -> Result<()> {
        let dir = TempDir::new("eval")?;
        let path = dir.path().join(ACTOR_FILE);
        save_mlp(&path, 3, ACT_DIM)?;
        let err = match load_policy(&path) {
            Ok(_) => panic!("a 3-input network must be rejected"),
            Err(e) => e,
        };
        assert!(format!("{:#}", err).contains("not a walker policy"));

        save_mlp(&path, OBS_DIM, ACT_DIM)?;
        let mut policy = load_policy(&path)?;
        let act: crate::WalkerAct = policy.sample(&crate::WalkerObs(vec![0.5; OBS_DIM]));
        assert_eq!(act.0, vec![0.0; ACT_DIM]);
        Ok(())
    }

    #[test]
    fn test_evaluate_with_trace() -> Result<()> {
        let dir = TempDir::new("eval")?;
        let trace_path = dir.path().join("trace.csv");
        let env = CountdownEnv::build(&CountdownEnvConfig::default().episode_len(3), 0)?;
        let config = EvalConfig {
            n_episodes: 2,
            trace_path: Some(trace_path.clone()),
            ..EvalConfig::default()
        };

        let summaries = evaluate_with(env, &mut ConstPolicy::default(), &config)?;
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].episode_return, 3.0);

        let trace = std::fs::read_to_string(&trace_path)?;
        let lines: Vec<&str> = trace.lines().collect();
        assert_eq!(lines[0], "episode,step,reward,raw_reward");
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[6], "1,2,1.0,1.0");
        Ok(())
    }
}
