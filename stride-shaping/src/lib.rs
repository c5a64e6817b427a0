#![warn(missing_docs)]
//! Reward shaping for the two-legged walker.
//!
//! A [`RewardShaper`] turns the raw reward of an environment step into a
//! shaped one using the observation vector and the action. Two shapers are
//! provided:
//!
//! * [`SimpleShaper`] for flat terrain: a few stateless bonuses and penalties
//!   on hull angle, forward speed, double support and vertical bouncing.
//! * [`GaitShaper`] for hardcore terrain: weighted stability, leg symmetry,
//!   alternating gait, action smoothness and obstacle clearing terms, with
//!   state that lives until the next reset.
//!
//! [`ShapedEnv`] wraps any [`Env`](stride_core::Env) whose observations and
//! actions are float vectors and applies a shaper to every step.
//!
//! ```rust
//! use stride_shaping::{RewardShaper, SimpleShaper, SimpleShaperConfig};
//!
//! let mut shaper = SimpleShaper::build(&SimpleShaperConfig::default());
//! let mut obs = [0f32; 24];
//! obs[2] = 0.5; // forward velocity
//!
//! let shaped = shaper.shape(&obs, &[0.0; 4], -0.1).unwrap();
//! // raw + 0.1 (upright) + 0.5 (speed)
//! assert!((shaped.total() - 0.5).abs() < 1e-6);
//! ```
mod env;
mod error;
mod gait;
mod history;
mod layout;
mod shaper;
mod simple;
pub use env::{ShapedEnv, ShapedEnvConfig};
pub use error::ShapingError;
pub use gait::{GaitShaper, GaitShaperConfig, GaitWeights};
pub use history::{ContactCounts, ContactHistory};
pub use layout::{LegLayout, ObsLayout};
pub use shaper::{RewardShaper, ShapedReward, Shaper, ShaperConfig};
pub use simple::{SimpleShaper, SimpleShaperConfig};
