//! Last-commanded angle per joint.

use super::joint::{clamp_angle, Joint, JointAngles, HOME_ANGLE};
use serde::{Deserialize, Serialize};

/// Single source of truth for where each joint was last commanded.
///
/// Every joint always has a defined angle; a fresh state has all joints at
/// [`HOME_ANGLE`]. Values are clamped into the joint domain on the way in,
/// so readers never see an out-of-range angle.
///
/// # Example
///
/// ```rust
/// use poseplay::core::{ArmState, Joint};
///
/// let mut arm = ArmState::new();
/// assert_eq!(arm.angle(Joint::Elbow), 90.0);
///
/// arm.set(Joint::Elbow, 250.0);
/// assert_eq!(arm.angle(Joint::Elbow), 180.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmState {
    angles: JointAngles,
}

impl Default for ArmState {
    fn default() -> Self {
        Self::new()
    }
}

impl ArmState {
    /// All joints at the home angle.
    pub fn new() -> Self {
        Self {
            angles: [HOME_ANGLE; Joint::COUNT],
        }
    }

    /// Start from explicit angles, clamped into range.
    pub fn from_angles(angles: JointAngles) -> Self {
        Self {
            angles: angles.map(clamp_angle),
        }
    }

    /// Last commanded angle of `joint`.
    pub fn angle(&self, joint: Joint) -> f64 {
        self.angles[joint.index()]
    }

    /// Record a new commanded angle for `joint`, clamped into range.
    pub fn set(&mut self, joint: Joint, angle: f64) {
        self.angles[joint.index()] = clamp_angle(angle);
    }

    /// Copy of every joint's angle.
    pub fn angles(&self) -> JointAngles {
        self.angles
    }
}
