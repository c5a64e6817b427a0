//! The interface of reward shapers.
use crate::{GaitShaper, GaitShaperConfig, ShapingError, SimpleShaper, SimpleShaperConfig};
use serde::{Deserialize, Serialize};

/// A raw reward with the terms a shaper added to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedReward {
    /// Reward returned by the environment.
    pub raw: f32,

    /// Weighted contribution of each shaping term, by name.
    pub components: Vec<(&'static str, f32)>,
}

impl ShapedReward {
    /// A reward without shaping terms.
    pub fn unshaped(raw: f32) -> Self {
        Self {
            raw,
            components: vec![],
        }
    }

    /// The raw reward plus the sum of all contributions.
    pub fn total(&self) -> f32 {
        self.raw + self.bonus()
    }

    /// Sum of all contributions.
    pub fn bonus(&self) -> f32 {
        self.components.iter().map(|(_, v)| v).sum()
    }

    /// Contribution of the term `name`, if any.
    pub fn component(&self, name: &str) -> Option<f32> {
        self.components
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
    }
}

/// Computes a shaped reward from an observation, an action and a raw reward.
pub trait RewardShaper {
    /// Configuration of the shaper.
    type Config: Clone;

    /// Builds a shaper.
    fn build(config: &Self::Config) -> Self;

    /// Clears the state carried between steps of an episode.
    fn reset(&mut self);

    /// Shapes the reward of a step.
    ///
    /// `obs` is the observation after the step and `act` the action that
    /// caused it.
    fn shape(&mut self, obs: &[f32], act: &[f32], reward: f32)
        -> Result<ShapedReward, ShapingError>;
}

/// Selects a shaper.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub enum ShaperConfig {
    /// Rewards are passed through.
    Identity,

    /// [`SimpleShaper`].
    Simple(SimpleShaperConfig),

    /// [`GaitShaper`].
    Gait(GaitShaperConfig),
}

impl Default for ShaperConfig {
    fn default() -> Self {
        Self::Identity
    }
}

/// One of the shapers in this crate, chosen at runtime with [`ShaperConfig`].
#[derive(Debug, Clone)]
pub enum Shaper {
    /// Passes rewards through.
    Identity,

    /// See [`SimpleShaper`].
    Simple(SimpleShaper),

    /// See [`GaitShaper`].
    Gait(GaitShaper),
}

impl RewardShaper for Shaper {
    type Config = ShaperConfig;

    fn build(config: &Self::Config) -> Self {
        match config {
            ShaperConfig::Identity => Self::Identity,
            ShaperConfig::Simple(config) => Self::Simple(SimpleShaper::build(config)),
            ShaperConfig::Gait(config) => Self::Gait(GaitShaper::build(config)),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Identity => {}
            Self::Simple(s) => s.reset(),
            Self::Gait(s) => s.reset(),
        }
    }

    fn shape(
        &mut self,
        obs: &[f32],
        act: &[f32],
        reward: f32,
    ) -> Result<ShapedReward, ShapingError> {
        match self {
            Self::Identity => Ok(ShapedReward::unshaped(reward)),
            Self::Simple(s) => s.shape(obs, act, reward),
            Self::Gait(s) => s.shape(obs, act, reward),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_identity_passes_reward_through() {
        let mut shaper = Shaper::build(&ShaperConfig::Identity);
        let shaped = shaper.shape(&[], &[], 1.5).unwrap();
        assert_eq!(shaped.total(), 1.5);
        assert!(shaped.components.is_empty());
    }

    #[test]
    fn test_shaper_config_yaml() {
        let config = ShaperConfig::Gait(GaitShaperConfig::default());
        let yaml = serde_yaml::to_string(&config).unwrap();
        let config_: ShaperConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, config_);
    }
}
