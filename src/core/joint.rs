//! Joint identities and the angle domain shared by every component.
//!
//! The arm has exactly four degrees of freedom. Each joint has a stable
//! index (0..3) that matches the actuator channel and the position of its
//! angle inside a [`JointAngles`] array.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest angle any joint may be commanded to, in degrees.
pub const MIN_ANGLE: f64 = 0.0;

/// Highest angle any joint may be commanded to, in degrees.
pub const MAX_ANGLE: f64 = 180.0;

/// Angle every joint starts at before any command is issued.
pub const HOME_ANGLE: f64 = 90.0;

/// One angle per joint, index-aligned with [`Joint::ALL`].
pub type JointAngles = [f64; Joint::COUNT];

/// A controlled degree of freedom of the arm.
///
/// # Example
///
/// ```rust
/// use poseplay::core::Joint;
///
/// assert_eq!(Joint::Shoulder.index(), 1);
/// assert_eq!(Joint::from_index(3), Some(Joint::Gripper));
/// assert_eq!(Joint::from_index(4), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Joint {
    Base,
    Shoulder,
    Elbow,
    Gripper,
}

impl Joint {
    /// Number of joints on the arm.
    pub const COUNT: usize = 4;

    /// All joints in index order.
    pub const ALL: [Joint; Joint::COUNT] =
        [Joint::Base, Joint::Shoulder, Joint::Elbow, Joint::Gripper];

    /// Stable channel index of this joint.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look a joint up by channel index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lowercase name used in logs and operator messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Shoulder => "shoulder",
            Self::Elbow => "elbow",
            Self::Gripper => "gripper",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Saturate an angle into `[MIN_ANGLE, MAX_ANGLE]`.
///
/// Adjusting past a limit is not an error; the angle simply stops at the
/// limit.
pub fn clamp_angle(angle: f64) -> f64 {
    angle.clamp(MIN_ANGLE, MAX_ANGLE)
}

/// True when `angle` is a finite value inside the joint domain.
pub fn is_valid_angle(angle: f64) -> bool {
    angle.is_finite() && (MIN_ANGLE..=MAX_ANGLE).contains(&angle)
}
