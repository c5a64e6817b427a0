//! A simple rollout buffer for on-policy agents.
//!
//! [`SimpleStepProcessor`] turns [`Step`](crate::Step)s into [`Transition`]s
//! and [`SimpleRolloutBuffer`] holds them until the agent has optimized on
//! them.
mod base;
mod config;
mod step_proc;
pub use base::{SimpleRolloutBuffer, Transition};
pub use config::SimpleRolloutBufferConfig;
pub use step_proc::{SimpleStepProcessor, SimpleStepProcessorConfig};
