//! Training presets and evaluation for a reward-shaped bipedal walker.
//!
//! The walker is gymnasium's `BipedalWalker-v3`, reached through
//! [`stride_py_gym_env`], and its rewards are shaped by [`stride_shaping`].
//!
//! * [`presets`] bundles terrain, shaper, PPO hyperparameters and the
//!   training loop configuration, and runs the loop with [`train`]. The agent
//!   is supplied by the caller through the [`Agent`](stride_core::Agent) trait.
//! * [`eval`] replays an exported actor network and prints episode returns.
//!
//! The `make_cfg` binary writes the presets as YAML files and the `evaluate`
//! binary replays a trained policy.
mod env;
pub mod eval;
pub mod presets;
mod types;
pub use env::{
    shaped_env_config, walker_env_config, ActFilter, ObsFilter, ShapedWalkerEnv,
    ShapedWalkerEnvConfig, ShaperChoice, Terrain, WalkerEnv,
};
pub use presets::{create_recorder, train, PpoConfig, TrainPreset};
pub use types::{WalkerAct, WalkerObs, ACT_DIM, OBS_DIM};
