//! Training presets.
use crate::{shaped_env_config, ShapedWalkerEnv, Terrain, WalkerAct, WalkerObs};
use anyhow::{bail, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufReader, Write},
    path::Path,
};
use stride_core::{
    record::AggregateRecorder,
    rollout_buffer::{
        SimpleRolloutBuffer, SimpleRolloutBufferConfig, SimpleStepProcessor,
        SimpleStepProcessorConfig,
    },
    Agent, DefaultEvaluator, Env, RolloutBufferBase, Schedule, StepProcessor, Trainer,
    TrainerConfig,
};
use stride_shaping::{GaitShaperConfig, ShaperConfig, SimpleShaperConfig};

/// Rollout buffer of the walker.
pub type RolloutBuffer = SimpleRolloutBuffer<WalkerObs, WalkerAct>;

/// Step processor of the walker.
pub type StepProc = SimpleStepProcessor<ShapedWalkerEnv>;

/// Names of the presets.
pub const PRESET_NAMES: [&str; 3] = ["hardcore_baseline", "flat_shaped", "hardcore_shaped"];

/// Hyperparameters of PPO.
///
/// The optimizer itself lives outside this workspace. The values are handed to
/// it through [`TrainPreset`] and `n_steps` sizes the rollout buffer.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PpoConfig {
    /// Learning rate as a function of the remaining progress.
    pub learning_rate: Schedule,

    /// Environment steps per rollout.
    pub n_steps: usize,

    /// Minibatch size.
    pub batch_size: usize,

    /// Passes over a rollout per optimization.
    pub n_epochs: usize,

    /// Discount factor.
    pub gamma: f64,

    /// GAE parameter.
    pub gae_lambda: f64,

    /// Clipping parameter of the surrogate objective.
    pub clip_range: Schedule,

    /// Coefficient of the entropy bonus.
    pub ent_coef: f64,

    /// Coefficient of the value loss.
    pub vf_coef: f64,

    /// Maximum norm of the gradient.
    pub max_grad_norm: f64,
}

impl Default for PpoConfig {
    fn default() -> Self {
        Self {
            learning_rate: Schedule::Constant(3e-4),
            n_steps: 2048,
            batch_size: 64,
            n_epochs: 10,
            gamma: 0.99,
            gae_lambda: 0.95,
            clip_range: Schedule::Constant(0.2),
            ent_coef: 0.0,
            vf_coef: 0.5,
            max_grad_norm: 0.5,
        }
    }
}

/// Everything a training run needs except the agent.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainPreset {
    /// Name of the preset.
    pub name: String,

    /// Terrain of the training and evaluation environments.
    pub terrain: Terrain,

    /// Shaper of the training and evaluation environments.
    pub shaper: ShaperConfig,

    /// Hyperparameters of the agent.
    pub ppo: PpoConfig,

    /// Configuration of the training loop.
    pub trainer: TrainerConfig,

    /// Episodes per evaluation.
    pub n_eval_episodes: usize,

    /// Seed of the training environment and the rollout buffer.
    pub seed: i64,

    /// Where TensorBoard logs are written. Records go to the log otherwise.
    pub tensorboard_dir: Option<String>,
}

impl TrainPreset {
    fn base(name: &str, terrain: Terrain, shaper: ShaperConfig, max_env_steps: usize) -> Self {
        Self {
            name: name.to_string(),
            terrain,
            shaper,
            ppo: PpoConfig::default(),
            trainer: TrainerConfig::default()
                .max_env_steps(max_env_steps)
                .eval_interval(10_000)
                .flush_record_interval(2048)
                .record_compute_cost_interval(2048)
                .model_dir("models")
                .log_dir("logs"),
            n_eval_episodes: 5,
            seed: 0,
            tensorboard_dir: None,
        }
    }

    /// Unshaped PPO with default hyperparameters on hardcore terrain.
    pub fn hardcore_baseline() -> Self {
        Self::base(
            "hardcore_baseline",
            Terrain::Hardcore,
            ShaperConfig::Identity,
            1_000_000,
        )
    }

    /// [`SimpleShaper`](stride_shaping::SimpleShaper) on flat terrain.
    pub fn flat_shaped() -> Self {
        Self::base(
            "flat_shaped",
            Terrain::Flat,
            ShaperConfig::Simple(SimpleShaperConfig::default()),
            1_000_000,
        )
    }

    /// [`GaitShaper`](stride_shaping::GaitShaper) on hardcore terrain with
    /// tuned hyperparameters.
    pub fn hardcore_shaped() -> Self {
        let mut preset = Self::base(
            "hardcore_shaped",
            Terrain::Hardcore,
            ShaperConfig::Gait(GaitShaperConfig::default()),
            10_000_000,
        );
        preset.ppo = PpoConfig {
            learning_rate: Schedule::LinearDecay { initial: 2.5e-4 },
            n_steps: 4096,
            batch_size: 64,
            n_epochs: 10,
            gamma: 0.995,
            gae_lambda: 0.97,
            clip_range: Schedule::Constant(0.2),
            ent_coef: 0.005,
            vf_coef: 0.5,
            ..PpoConfig::default()
        };
        preset.trainer = preset.trainer.eval_interval(2500);
        preset.n_eval_episodes = 10;
        preset.tensorboard_dir = Some("logs/tensorboard".to_string());
        preset
    }

    /// Returns the preset of the given name.
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "hardcore_baseline" => Ok(Self::hardcore_baseline()),
            "flat_shaped" => Ok(Self::flat_shaped()),
            "hardcore_shaped" => Ok(Self::hardcore_shaped()),
            _ => bail!(
                "Unknown preset {:?}, expected one of {:?}",
                name,
                PRESET_NAMES
            ),
        }
    }

    /// Constructs [`TrainPreset`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainPreset`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }

    /// Configuration of the rollout buffer.
    pub fn rollout_buffer_config(&self) -> SimpleRolloutBufferConfig {
        SimpleRolloutBufferConfig::default()
            .n_steps(self.ppo.n_steps)
            .seed(self.seed as u64)
    }
}

/// Creates the recorder of a preset.
///
/// Records go to TensorBoard if `tensorboard_dir` is set and to the log
/// otherwise.
pub fn create_recorder(preset: &TrainPreset) -> Result<Box<dyn AggregateRecorder>> {
    match preset.tensorboard_dir.as_ref() {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            Ok(Box::new(stride_tensorboard::TensorboardRecorder::new(dir)))
        }
        None => Ok(Box::new(stride_core::record::LogRecorder::new())),
    }
}

/// Trains an agent with a preset.
///
/// The training environment and the evaluation environment are the walker on
/// the preset's terrain with the preset's shaper. The evaluation environment
/// is seeded with the episode index, so every evaluation sees the same
/// episodes. The preset is saved to `(model_dir)/preset.yaml`.
pub fn train<A>(
    preset: &TrainPreset,
    agent: &mut A,
    recorder: &mut Box<dyn AggregateRecorder>,
) -> Result<()>
where
    A: Agent<ShapedWalkerEnv, RolloutBuffer>,
{
    info!("Training with preset {}", preset.name);
    if let Some(model_dir) = preset.trainer.model_dir.as_ref() {
        fs::create_dir_all(model_dir)?;
        preset.save(Path::new(model_dir).join("preset.yaml"))?;
    }

    let env_config = shaped_env_config(preset.terrain, preset.shaper.clone(), false);
    let env = ShapedWalkerEnv::build(&env_config, preset.seed)?;
    let step_proc = StepProc::build(&SimpleStepProcessorConfig::default());
    let mut buffer = RolloutBuffer::build(&preset.rollout_buffer_config());
    let mut evaluator = DefaultEvaluator::<ShapedWalkerEnv, A>::new(
        &env_config,
        preset.seed,
        preset.n_eval_episodes,
    )?;

    let mut trainer = Trainer::build(preset.trainer.clone());
    trainer.train(
        env,
        step_proc,
        agent,
        &mut buffer,
        recorder,
        &mut evaluator,
    )
}
