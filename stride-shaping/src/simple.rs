//! Shaper for flat terrain.
use crate::{ObsLayout, RewardShaper, ShapedReward, ShapingError};
use serde::{Deserialize, Serialize};

/// Configuration of [`SimpleShaper`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SimpleShaperConfig {
    /// Where to read the walker's state.
    pub layout: ObsLayout,

    /// Scale of the upright bonus.
    pub stability_scale: f32,

    /// Decay rate of the upright bonus in the hull angle.
    pub stability_decay: f32,

    /// Upper bound of the speed bonus.
    ///
    /// The bonus is never negative, so a bound below zero disables it.
    pub max_speed_bonus: f32,

    /// Contact flag value above which a foot counts as grounded.
    pub contact_threshold: f32,

    /// Penalty for standing on both feet.
    pub double_support_penalty: f32,

    /// Penalty per unit of vertical speed.
    pub bounce_penalty: f32,
}

impl Default for SimpleShaperConfig {
    fn default() -> Self {
        Self {
            layout: ObsLayout::bipedal_walker(),
            stability_scale: 0.1,
            stability_decay: 3.0,
            max_speed_bonus: 1.0,
            contact_threshold: 0.5,
            double_support_penalty: 0.1,
            bounce_penalty: 0.5,
        }
    }
}

impl SimpleShaperConfig {
    /// Sets the observation layout.
    pub fn layout(mut self, v: ObsLayout) -> Self {
        self.layout = v;
        self
    }

    /// Sets the scale of the upright bonus.
    pub fn stability_scale(mut self, v: f32) -> Self {
        self.stability_scale = v;
        self
    }

    /// Sets the penalty for standing on both feet.
    pub fn double_support_penalty(mut self, v: f32) -> Self {
        self.double_support_penalty = v;
        self
    }

    /// Sets the penalty per unit of vertical speed.
    pub fn bounce_penalty(mut self, v: f32) -> Self {
        self.bounce_penalty = v;
        self
    }
}

/// Stateless shaper for flat terrain.
///
/// With the default configuration it adds to the raw reward:
///
/// * `stability`: `0.1 * exp(-3 |hull angle|)`
/// * `speed`: forward velocity clamped to `[0, 1]`
/// * `double_support`: `-0.1` when both contact flags exceed 0.5
/// * `bounce`: `-0.5 |vertical velocity|`
#[derive(Debug, Clone)]
pub struct SimpleShaper {
    config: SimpleShaperConfig,
}

impl RewardShaper for SimpleShaper {
    type Config = SimpleShaperConfig;

    fn build(config: &Self::Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn reset(&mut self) {}

    fn shape(
        &mut self,
        obs: &[f32],
        _act: &[f32],
        reward: f32,
    ) -> Result<ShapedReward, ShapingError> {
        let c = &self.config;
        let hull_angle = c.layout.hull_angle(obs)?;
        let vx = c.layout.vx(obs)?;
        let vy = c.layout.vy(obs)?;
        let (left, right) = c.layout.contacts(obs)?;

        let stability = c.stability_scale * (-c.stability_decay * hull_angle.abs()).exp();
        // A negative bound turns the bonus off.
        let speed = vx.min(c.max_speed_bonus).max(0.0);
        let double_support = if left > c.contact_threshold && right > c.contact_threshold {
            -c.double_support_penalty
        } else {
            0.0
        };
        let bounce = -c.bounce_penalty * vy.abs();

        Ok(ShapedReward {
            raw: reward,
            components: vec![
                ("stability", stability),
                ("speed", speed),
                ("double_support", double_support),
                ("bounce", bounce),
            ],
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn obs(hull_angle: f32, vx: f32, vy: f32, contacts: (f32, f32)) -> Vec<f32> {
        let mut obs = vec![0.0; 24];
        obs[0] = hull_angle;
        obs[2] = vx;
        obs[3] = vy;
        obs[8] = contacts.0;
        obs[13] = contacts.1;
        obs
    }

    fn shape(obs: &[f32], reward: f32) -> ShapedReward {
        let mut shaper = SimpleShaper::build(&SimpleShaperConfig::default());
        shaper.shape(obs, &[0.0; 4], reward).unwrap()
    }

    #[test]
    fn test_upright_and_still() {
        let shaped = shape(&obs(0.0, 0.0, 0.0, (0.0, 0.0)), 0.0);
        assert!((shaped.total() - 0.1).abs() < 1e-6);
        assert_eq!(shaped.component("speed"), Some(0.0));
    }

    #[test]
    fn test_each_term() {
        let shaped = shape(&obs(0.2, 0.4, -0.2, (1.0, 1.0)), 1.0);
        let stability = 0.1 * (-0.6f32).exp();
        assert!((shaped.component("stability").unwrap() - stability).abs() < 1e-6);
        assert_eq!(shaped.component("speed"), Some(0.4));
        assert_eq!(shaped.component("double_support"), Some(-0.1));
        assert!((shaped.component("bounce").unwrap() + 0.1).abs() < 1e-6);
        let expected = 1.0 + stability + 0.4 - 0.1 - 0.1;
        assert!((shaped.total() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_speed_is_clamped() {
        let fast = shape(&obs(0.0, 3.0, 0.0, (0.0, 0.0)), 0.0);
        assert_eq!(fast.component("speed"), Some(1.0));
        let backwards = shape(&obs(0.0, -1.0, 0.0, (0.0, 0.0)), 0.0);
        assert_eq!(backwards.component("speed"), Some(0.0));
    }

    #[test]
    fn test_negative_speed_bound_from_yaml() {
        let yaml = serde_yaml::to_string(&SimpleShaperConfig::default())
            .unwrap()
            .replace("max_speed_bonus: 1.0", "max_speed_bonus: -1.0");
        let config: SimpleShaperConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.max_speed_bonus, -1.0);

        let mut shaper = SimpleShaper::build(&config);
        let shaped = shaper.shape(&[0.0; 24], &[], 0.0).unwrap();
        assert_eq!(shaped.component("speed"), Some(0.0));
        let shaped = shaper.shape(&obs(0.0, 2.0, 0.0, (0.0, 0.0)), &[], 0.0).unwrap();
        assert_eq!(shaped.component("speed"), Some(0.0));
    }

    #[test]
    fn test_single_contact_is_not_penalized() {
        let shaped = shape(&obs(0.0, 0.0, 0.0, (1.0, 0.0)), 0.0);
        assert_eq!(shaped.component("double_support"), Some(0.0));
    }

    #[test]
    fn test_config_changes_constants() {
        let config = SimpleShaperConfig::default()
            .stability_scale(0.0)
            .bounce_penalty(0.0)
            .double_support_penalty(1.0);
        let mut shaper = SimpleShaper::build(&config);
        let shaped = shaper
            .shape(&obs(0.0, 0.0, 2.0, (1.0, 1.0)), &[], 0.0)
            .unwrap();
        assert!((shaped.total() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_short_obs_is_error() {
        let mut shaper = SimpleShaper::build(&SimpleShaperConfig::default());
        assert!(shaper.shape(&[0.0; 4], &[], 0.0).is_err());
    }
}
