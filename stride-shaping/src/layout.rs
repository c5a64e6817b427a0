//! Positions of the walker's state in the observation vector.
use crate::ShapingError;
use serde::{Deserialize, Serialize};

/// Positions of one leg's state in the observation vector.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct LegLayout {
    /// Hip joint angle.
    pub hip_angle: usize,

    /// Hip joint speed.
    pub hip_speed: usize,

    /// Knee joint angle.
    pub knee_angle: usize,

    /// Knee joint speed.
    pub knee_speed: usize,

    /// Ground contact flag.
    pub contact: usize,
}

/// Positions of the walker's state in the observation vector.
///
/// [`ObsLayout::bipedal_walker`] is the layout of `BipedalWalker-v3`.
/// [`ObsLayout::legacy`] reproduces the offsets a previous generation of
/// shapers read from, which put the hull angle at index 2 and grouped joint
/// angles, joint speeds and contacts in separate blocks.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct ObsLayout {
    /// Hull angle.
    pub hull_angle: usize,

    /// Hull angular velocity.
    pub hull_angular_velocity: usize,

    /// Horizontal velocity.
    pub vx: usize,

    /// Vertical velocity.
    pub vy: usize,

    /// The first leg.
    pub left: LegLayout,

    /// The second leg.
    pub right: LegLayout,

    /// Index of the first lidar reading.
    pub lidar_start: usize,

    /// Number of lidar readings, `None` for all elements up to the end.
    pub lidar_len: Option<usize>,
}

impl Default for ObsLayout {
    fn default() -> Self {
        Self::bipedal_walker()
    }
}

impl ObsLayout {
    /// Layout of the 24-dimensional observation of `BipedalWalker-v3`.
    pub fn bipedal_walker() -> Self {
        Self {
            hull_angle: 0,
            hull_angular_velocity: 1,
            vx: 2,
            vy: 3,
            left: LegLayout {
                hip_angle: 4,
                hip_speed: 5,
                knee_angle: 6,
                knee_speed: 7,
                contact: 8,
            },
            right: LegLayout {
                hip_angle: 9,
                hip_speed: 10,
                knee_angle: 11,
                knee_speed: 12,
                contact: 13,
            },
            lidar_start: 14,
            lidar_len: Some(10),
        }
    }

    /// Legacy layout.
    pub fn legacy() -> Self {
        Self {
            hull_angle: 2,
            hull_angular_velocity: 1,
            vx: 3,
            vy: 4,
            left: LegLayout {
                hip_angle: 6,
                hip_speed: 10,
                knee_angle: 7,
                knee_speed: 11,
                contact: 14,
            },
            right: LegLayout {
                hip_angle: 8,
                hip_speed: 12,
                knee_angle: 9,
                knee_speed: 13,
                contact: 15,
            },
            lidar_start: 16,
            lidar_len: None,
        }
    }

    /// Returns `obs[index]`.
    pub fn get(obs: &[f32], index: usize) -> Result<f32, ShapingError> {
        obs.get(index).copied().ok_or(ShapingError::ObsTooShort {
            index,
            len: obs.len(),
        })
    }

    /// Hull angle.
    pub fn hull_angle(&self, obs: &[f32]) -> Result<f32, ShapingError> {
        Self::get(obs, self.hull_angle)
    }

    /// Hull angular velocity.
    pub fn hull_angular_velocity(&self, obs: &[f32]) -> Result<f32, ShapingError> {
        Self::get(obs, self.hull_angular_velocity)
    }

    /// Horizontal velocity.
    pub fn vx(&self, obs: &[f32]) -> Result<f32, ShapingError> {
        Self::get(obs, self.vx)
    }

    /// Vertical velocity.
    pub fn vy(&self, obs: &[f32]) -> Result<f32, ShapingError> {
        Self::get(obs, self.vy)
    }

    /// Contact flags of the two legs.
    pub fn contacts(&self, obs: &[f32]) -> Result<(f32, f32), ShapingError> {
        Ok((
            Self::get(obs, self.left.contact)?,
            Self::get(obs, self.right.contact)?,
        ))
    }

    /// `[hip angle, knee angle]` of a leg.
    pub fn joint_angles(leg: &LegLayout, obs: &[f32]) -> Result<[f32; 2], ShapingError> {
        Ok([Self::get(obs, leg.hip_angle)?, Self::get(obs, leg.knee_angle)?])
    }

    /// `[hip speed, knee speed]` of a leg.
    pub fn joint_speeds(leg: &LegLayout, obs: &[f32]) -> Result<[f32; 2], ShapingError> {
        Ok([Self::get(obs, leg.hip_speed)?, Self::get(obs, leg.knee_speed)?])
    }

    /// Lidar readings.
    ///
    /// The range is clipped to the observation, so a short observation gives
    /// fewer (possibly zero) readings instead of an error.
    pub fn lidar<'a>(&self, obs: &'a [f32]) -> &'a [f32] {
        let start = self.lidar_start.min(obs.len());
        let end = match self.lidar_len {
            Some(n) => self.lidar_start.saturating_add(n).min(obs.len()),
            None => obs.len(),
        };
        &obs[start..end]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ramp(n: usize) -> Vec<f32> {
        (0..n).map(|i| i as f32).collect()
    }

    #[test]
    fn test_bipedal_walker_layout() {
        let obs = ramp(24);
        let layout = ObsLayout::bipedal_walker();
        assert_eq!(layout.hull_angle(&obs), Ok(0.0));
        assert_eq!(layout.vx(&obs), Ok(2.0));
        assert_eq!(layout.vy(&obs), Ok(3.0));
        assert_eq!(layout.contacts(&obs), Ok((8.0, 13.0)));
        assert_eq!(ObsLayout::joint_angles(&layout.left, &obs), Ok([4.0, 6.0]));
        assert_eq!(ObsLayout::joint_speeds(&layout.right, &obs), Ok([10.0, 12.0]));
        assert_eq!(layout.lidar(&obs), &obs[14..24]);
    }

    #[test]
    fn test_legacy_layout() {
        let obs = ramp(24);
        let layout = ObsLayout::legacy();
        assert_eq!(layout.hull_angle(&obs), Ok(2.0));
        assert_eq!(layout.vx(&obs), Ok(3.0));
        assert_eq!(layout.vy(&obs), Ok(4.0));
        assert_eq!(layout.contacts(&obs), Ok((14.0, 15.0)));
        assert_eq!(ObsLayout::joint_angles(&layout.left, &obs), Ok([6.0, 7.0]));
        assert_eq!(ObsLayout::joint_angles(&layout.right, &obs), Ok([8.0, 9.0]));
        assert_eq!(ObsLayout::joint_speeds(&layout.left, &obs), Ok([10.0, 11.0]));
        assert_eq!(ObsLayout::joint_speeds(&layout.right, &obs), Ok([12.0, 13.0]));
        assert_eq!(layout.lidar(&obs), &obs[16..]);
    }

    #[test]
    fn test_short_obs() {
        let obs = ramp(12);
        let layout = ObsLayout::bipedal_walker();
        assert_eq!(
            layout.contacts(&obs),
            Err(ShapingError::ObsTooShort { index: 13, len: 12 })
        );
        assert!(layout.lidar(&obs).is_empty());
        assert_eq!(layout.lidar(&ramp(18)), &[14.0, 15.0, 16.0, 17.0]);
    }
}
