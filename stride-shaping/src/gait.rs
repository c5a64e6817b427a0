//! Shaper for hardcore terrain.
use crate::{ContactHistory, ObsLayout, RewardShaper, ShapedReward, ShapingError};
use log::trace;
use serde::{Deserialize, Serialize};

/// Weights of the terms of [`GaitShaper`].
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct GaitWeights {
    /// Weight of the upright and steady hull term.
    pub stability: f32,

    /// Weight of the leg symmetry term.
    pub symmetry: f32,

    /// Weight of the alternating gait term.
    pub gait: f32,

    /// Weight of the action smoothness term.
    pub smoothness: f32,

    /// Weight of the obstacle clearing term.
    pub obstacle: f32,
}

impl Default for GaitWeights {
    fn default() -> Self {
        Self {
            stability: 0.3,
            symmetry: 0.2,
            gait: 0.25,
            smoothness: 0.15,
            obstacle: 0.1,
        }
    }
}

/// Configuration of [`GaitShaper`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GaitShaperConfig {
    /// Where to read the walker's state.
    pub layout: ObsLayout,

    /// Weights of the terms.
    pub weights: GaitWeights,

    /// Number of contact pairs kept in the history.
    pub history_capacity: usize,

    /// Number of recent contact pairs the gait term looks at.
    pub gait_window: usize,

    /// Range of lidar readings, relative to the first one, that look ahead.
    pub front_lidar: (usize, usize),

    /// Lidar reading below which an obstacle is considered close.
    pub obstacle_threshold: f32,
}

impl Default for GaitShaperConfig {
    fn default() -> Self {
        Self {
            layout: ObsLayout::bipedal_walker(),
            weights: GaitWeights::default(),
            history_capacity: 20,
            gait_window: 10,
            front_lidar: (5, 15),
            obstacle_threshold: 0.5,
        }
    }
}

impl GaitShaperConfig {
    /// Sets the observation layout.
    pub fn layout(mut self, v: ObsLayout) -> Self {
        self.layout = v;
        self
    }

    /// Sets the weights of the terms.
    pub fn weights(mut self, v: GaitWeights) -> Self {
        self.weights = v;
        self
    }

    /// Sets the number of contact pairs the gait term looks at.
    pub fn gait_window(mut self, v: usize) -> Self {
        self.gait_window = v;
        self
    }
}

/// Shaper for hardcore terrain.
///
/// The shaped reward is the raw reward plus a weighted sum of five terms:
///
/// * `stability`: `exp(-5 |hull angle|) + 0.5 exp(-10 |vy|)`
/// * `symmetry`: `exp(-2 (angle_diff + speed_diff))`, where the diffs are the
///   mean absolute differences between the legs' hip and knee joints.
/// * `gait`: [`ContactHistory::alternation_score`] over the recent contacts.
/// * `smoothness`: `exp(-5 mean |a - a_prev|)`, `0` on the first step.
/// * `obstacle`: when a front lidar reading is below the threshold, `0.5` per
///   lifted foot plus `min(vx / 2, 1)` when moving forward.
///
/// The previous action, hull angle and horizontal velocity, the step count and
/// the contact history live until [`RewardShaper::reset`].
#[derive(Debug, Clone)]
pub struct GaitShaper {
    config: GaitShaperConfig,
    history: ContactHistory,
    prev_action: Option<Vec<f32>>,
    prev_hull_angle: f32,
    prev_hull_vel: f32,
    step_count: usize,
}

impl GaitShaper {
    /// Number of steps shaped since the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Hull angle of the last shaped step.
    pub fn prev_hull_angle(&self) -> f32 {
        self.prev_hull_angle
    }

    /// Horizontal velocity of the last shaped step.
    pub fn prev_hull_vel(&self) -> f32 {
        self.prev_hull_vel
    }

    /// Contact history.
    pub fn history(&self) -> &ContactHistory {
        &self.history
    }

    fn stability(&self, obs: &[f32]) -> Result<f32, ShapingError> {
        let hull_angle = self.config.layout.hull_angle(obs)?;
        let vy = self.config.layout.vy(obs)?;
        Ok((-5.0 * hull_angle.abs()).exp() + 0.5 * (-10.0 * vy.abs()).exp())
    }

    fn symmetry(&self, obs: &[f32]) -> Result<f32, ShapingError> {
        let layout = &self.config.layout;
        let mean_abs_diff = |l: [f32; 2], r: [f32; 2]| {
            ((l[0] - r[0]).abs() + (l[1] - r[1]).abs()) / 2.0
        };
        let angle_diff = mean_abs_diff(
            ObsLayout::joint_angles(&layout.left, obs)?,
            ObsLayout::joint_angles(&layout.right, obs)?,
        );
        let speed_diff = mean_abs_diff(
            ObsLayout::joint_speeds(&layout.left, obs)?,
            ObsLayout::joint_speeds(&layout.right, obs)?,
        );
        Ok((-2.0 * (angle_diff + speed_diff)).exp())
    }

    fn smoothness(&self, act: &[f32]) -> Result<f32, ShapingError> {
        let prev = match self.prev_action.as_ref() {
            Some(prev) => prev,
            None => return Ok(0.0),
        };
        if prev.len() != act.len() {
            return Err(ShapingError::ActionLength {
                expected: prev.len(),
                got: act.len(),
            });
        }
        if act.is_empty() {
            return Ok(1.0);
        }
        let mean = act
            .iter()
            .zip(prev.iter())
            .map(|(a, p)| (a - p).abs())
            .sum::<f32>()
            / act.len() as f32;
        Ok((-5.0 * mean).exp())
    }

    fn obstacle(&self, obs: &[f32], contacts: (f32, f32), vx: f32) -> f32 {
        let lidar = self.config.layout.lidar(obs);
        let (lo, hi) = self.config.front_lidar;
        let start = lo.min(lidar.len());
        let front = &lidar[start..hi.min(lidar.len()).max(start)];

        if !front.iter().any(|&d| d < self.config.obstacle_threshold) {
            return 0.0;
        }

        let mut bonus = 0.0;
        if contacts.0 == 0.0 {
            bonus += 0.5;
        }
        if contacts.1 == 0.0 {
            bonus += 0.5;
        }
        if vx > 0.0 {
            bonus += (vx / 2.0).min(1.0);
        }
        bonus
    }
}

impl RewardShaper for GaitShaper {
    type Config = GaitShaperConfig;

    fn build(config: &Self::Config) -> Self {
        Self {
            config: config.clone(),
            history: ContactHistory::new(config.history_capacity, config.gait_window),
            prev_action: None,
            prev_hull_angle: 0.0,
            prev_hull_vel: 0.0,
            step_count: 0,
        }
    }

    fn reset(&mut self) {
        self.history.clear();
        self.prev_action = None;
        self.prev_hull_angle = 0.0;
        self.prev_hull_vel = 0.0;
        self.step_count = 0;
    }

    fn shape(
        &mut self,
        obs: &[f32],
        act: &[f32],
        reward: f32,
    ) -> Result<ShapedReward, ShapingError> {
        let layout = self.config.layout;
        let hull_angle = layout.hull_angle(obs)?;
        let vx = layout.vx(obs)?;
        let contacts = layout.contacts(obs)?;

        let stability = self.stability(obs)?;
        let symmetry = self.symmetry(obs)?;
        let smoothness = self.smoothness(act)?;
        self.history.push(contacts.0, contacts.1);
        let gait = self.history.alternation_score();
        let obstacle = self.obstacle(obs, contacts, vx);

        let w = &self.config.weights;
        let shaped = ShapedReward {
            raw: reward,
            components: vec![
                ("stability", w.stability * stability),
                ("symmetry", w.symmetry * symmetry),
                ("gait", w.gait * gait),
                ("smoothness", w.smoothness * smoothness),
                ("obstacle", w.obstacle * obstacle),
            ],
        };
        trace!("step {}: {:?}", self.step_count, shaped.components);

        self.prev_action = Some(act.to_vec());
        self.prev_hull_angle = hull_angle;
        self.prev_hull_vel = vx;
        self.step_count += 1;

        Ok(shaped)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EPS: f32 = 1e-5;

    /// Upright, still, legs in the same pose, no contacts, nothing ahead.
    fn neutral_obs() -> Vec<f32> {
        let mut obs = vec![0.0; 24];
        for d in obs[14..24].iter_mut() {
            *d = 1.0;
        }
        obs
    }

    fn shaper() -> GaitShaper {
        GaitShaper::build(&GaitShaperConfig::default())
    }

    #[test]
    fn test_first_step() {
        let mut shaper = shaper();
        let shaped = shaper.shape(&neutral_obs(), &[0.0; 4], 0.0).unwrap();

        // stability: 1 + 0.5, symmetry: 1, gait and smoothness: 0, obstacle: 0
        assert!((shaped.component("stability").unwrap() - 0.45).abs() < EPS);
        assert!((shaped.component("symmetry").unwrap() - 0.2).abs() < EPS);
        assert_eq!(shaped.component("gait"), Some(0.0));
        assert_eq!(shaped.component("smoothness"), Some(0.0));
        assert_eq!(shaped.component("obstacle"), Some(0.0));
        assert!((shaped.total() - 0.65).abs() < EPS);
        assert_eq!(shaper.step_count(), 1);
    }

    #[test]
    fn test_symmetry() {
        let mut obs = neutral_obs();
        obs[4] = 0.5; // left hip angle
        obs[11] = -0.3; // right knee angle
        obs[5] = 0.2; // left hip speed
        let mut shaper = shaper();
        let shaped = shaper.shape(&obs, &[0.0; 4], 0.0).unwrap();

        let angle_diff = (0.5 + 0.3) / 2.0;
        let speed_diff = 0.2 / 2.0;
        let expected = 0.2 * (-2.0f32 * (angle_diff + speed_diff)).exp();
        assert!((shaped.component("symmetry").unwrap() - expected).abs() < EPS);
    }

    #[test]
    fn test_smoothness() {
        let mut shaper = shaper();
        shaper.shape(&neutral_obs(), &[0.0; 4], 0.0).unwrap();
        let shaped = shaper
            .shape(&neutral_obs(), &[0.4, 0.0, -0.4, 0.0], 0.0)
            .unwrap();
        let expected = 0.15 * (-5.0f32 * 0.2).exp();
        assert!((shaped.component("smoothness").unwrap() - expected).abs() < EPS);

        let err = shaper.shape(&neutral_obs(), &[0.0; 2], 0.0).unwrap_err();
        assert_eq!(
            err,
            ShapingError::ActionLength {
                expected: 4,
                got: 2
            }
        );
    }

    #[test]
    fn test_gait_after_window_is_filled() {
        let mut shaper = shaper();
        let mut obs = neutral_obs();
        for i in 0..10 {
            let (l, r) = if i % 2 == 0 { (1.0, 0.0) } else { (0.0, 1.0) };
            obs[8] = l;
            obs[13] = r;
            let shaped = shaper.shape(&obs, &[0.0; 4], 0.0).unwrap();
            if i < 9 {
                assert_eq!(shaped.component("gait"), Some(0.0));
            } else {
                assert!((shaped.component("gait").unwrap() - 0.25).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_obstacle() {
        let mut obs = neutral_obs();
        obs[2] = 1.0; // vx
        obs[8] = 1.0; // left foot on the ground
        let mut shaper = shaper();

        // A close reading outside the front range is ignored.
        obs[14 + 2] = 0.1;
        let shaped = shaper.shape(&obs, &[0.0; 4], 0.0).unwrap();
        assert_eq!(shaped.component("obstacle"), Some(0.0));

        obs[14 + 7] = 0.3;
        let shaped = shaper.shape(&obs, &[0.0; 4], 0.0).unwrap();
        // right foot lifted: 0.5, forward: min(1/2, 1)
        assert!((shaped.component("obstacle").unwrap() - 0.1).abs() < EPS);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut shaper = shaper();
        let mut obs = neutral_obs();
        obs[0] = 0.1;
        obs[2] = 0.7;
        for _ in 0..12 {
            shaper.shape(&obs, &[0.1; 4], 0.0).unwrap();
        }
        assert_eq!(shaper.step_count(), 12);
        assert_eq!(shaper.prev_hull_angle(), 0.1);
        assert_eq!(shaper.prev_hull_vel(), 0.7);
        assert_eq!(shaper.history().len(), 12);

        shaper.reset();
        assert_eq!(shaper.step_count(), 0);
        assert!(shaper.history().is_empty());
        let shaped = shaper.shape(&obs, &[0.9; 4], 0.0).unwrap();
        assert_eq!(shaped.component("smoothness"), Some(0.0));
    }

    #[test]
    fn test_legacy_layout() {
        let config = GaitShaperConfig::default().layout(ObsLayout::legacy());
        let mut shaper = GaitShaper::build(&config);
        let mut obs = vec![0.0; 24];
        obs[2] = 0.2; // hull angle in the legacy layout
        let shaped = shaper.shape(&obs, &[0.0; 4], 0.0).unwrap();
        let expected = 0.3 * ((-1.0f32).exp() + 0.5);
        assert!((shaped.component("stability").unwrap() - expected).abs() < EPS);
    }
}
