//! The walker environment with reward shaping.
use crate::{WalkerAct, WalkerObs};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};
use stride_py_gym_env::{ArrayObsFilter, ContinuousActFilter, GymEnv, GymEnvConfig, GymObsFilter};
use stride_shaping::{
    GaitShaperConfig, ShapedEnv, ShapedEnvConfig, Shaper, ShaperConfig, SimpleShaperConfig,
};

/// Observation filter of the walker.
pub type ObsFilter = ArrayObsFilter<f32, f32, WalkerObs>;

/// Action filter of the walker.
pub type ActFilter = ContinuousActFilter<WalkerAct>;

/// `BipedalWalker-v3` without shaping.
pub type WalkerEnv = GymEnv<WalkerObs, WalkerAct, ObsFilter, ActFilter>;

/// `BipedalWalker-v3` with a shaper chosen at runtime.
pub type ShapedWalkerEnv = ShapedEnv<WalkerEnv, Shaper>;

/// Configuration of [`ShapedWalkerEnv`].
pub type ShapedWalkerEnvConfig =
    ShapedEnvConfig<GymEnvConfig<WalkerObs, WalkerAct, ObsFilter, ActFilter>, ShaperConfig>;

/// Terrain of the walker.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum Terrain {
    /// Gentle hills.
    Flat,

    /// Stumps, pitfalls and stairs.
    Hardcore,
}

impl FromStr for Terrain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Self::Flat),
            "hardcore" => Ok(Self::Hardcore),
            _ => Err(format!("Unknown terrain {:?}, expected flat or hardcore", s)),
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Hardcore => write!(f, "hardcore"),
        }
    }
}

/// Selects a shaper with its default configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaperChoice {
    /// No shaping.
    None,

    /// [`SimpleShaper`](stride_shaping::SimpleShaper).
    Simple,

    /// [`GaitShaper`](stride_shaping::GaitShaper).
    Gait,
}

impl FromStr for ShaperChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "simple" => Ok(Self::Simple),
            "gait" => Ok(Self::Gait),
            _ => Err(format!(
                "Unknown shaper {:?}, expected none, simple or gait",
                s
            )),
        }
    }
}

impl From<ShaperChoice> for ShaperConfig {
    fn from(choice: ShaperChoice) -> Self {
        match choice {
            ShaperChoice::None => ShaperConfig::Identity,
            ShaperChoice::Simple => ShaperConfig::Simple(SimpleShaperConfig::default()),
            ShaperChoice::Gait => ShaperConfig::Gait(GaitShaperConfig::default()),
        }
    }
}

/// Configuration of the walker on the given terrain.
///
/// With `render`, episodes are shown in a window, slowed down by `wait`.
pub fn walker_env_config(
    terrain: Terrain,
    render: bool,
    wait: Duration,
) -> GymEnvConfig<WalkerObs, WalkerAct, ObsFilter, ActFilter> {
    let config = GymEnvConfig::default()
        .name("BipedalWalker-v3")
        .hardcore(terrain == Terrain::Hardcore)
        .obs_filter_config(ObsFilter::default_config());
    match render {
        true => config.render_mode(Some("human".to_string())).wait(wait),
        false => config,
    }
}

/// Configuration of the shaped walker.
pub fn shaped_env_config(
    terrain: Terrain,
    shaper: ShaperConfig,
    render: bool,
) -> ShapedWalkerEnvConfig {
    ShapedEnvConfig::new(
        walker_env_config(terrain, render, Duration::from_millis(0)),
        shaper,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!("hardcore".parse::<Terrain>(), Ok(Terrain::Hardcore));
        assert!("rocky".parse::<Terrain>().is_err());
        assert_eq!(Terrain::Flat.to_string(), "flat");
        assert_eq!(
            ShaperConfig::from("gait".parse::<ShaperChoice>().unwrap()),
            ShaperConfig::Gait(GaitShaperConfig::default())
        );
        assert_eq!(
            ShaperConfig::from(ShaperChoice::None),
            ShaperConfig::Identity
        );
    }

    #[test]
    fn test_env_config() {
        let config = shaped_env_config(Terrain::Hardcore, ShaperConfig::Identity, true);
        assert!(config.env_config.hardcore);
        assert_eq!(config.env_config.name, "BipedalWalker-v3");
        assert_eq!(config.env_config.render_mode.as_deref(), Some("human"));
    }
}
