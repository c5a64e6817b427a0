#![warn(missing_docs)]
//! Core components of stride: environments, policies, agents and the
//! on-policy training loop that drives them.
//!
//! The environment and the agent are both opaque to this crate. An [`Env`]
//! only has to follow the usual `reset`/`step` contract, and an [`Agent`] only
//! has to sample actions and optimize itself on a rollout buffer. The
//! [`Trainer`] ties the two together, periodically evaluates the agent with an
//! [`Evaluator`] and keeps the best model on disk.
pub mod error;
pub mod record;
pub mod rollout_buffer;

mod base;
pub use base::{
    Act, Agent, Env, ExperienceBufferBase, Info, Obs, Policy, RolloutBufferBase, Step,
    StepProcessor,
};

mod evaluator;
pub use evaluator::{DefaultEvaluator, EpisodeSummary, Evaluator};

mod schedule;
pub use schedule::Schedule;

mod trainer;
pub use trainer::{Sampler, Trainer, TrainerConfig};

pub mod dummy;
