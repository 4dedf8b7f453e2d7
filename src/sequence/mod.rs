//! Recorded poses, their persistence, and replay.
//!
//! A [`Sequence`] is an ordered list of [`Pose`] snapshots taken from the
//! arm's commanded state. Sequences persist to JSON (or bincode for `.bin`
//! files) and replay through the trajectory player.

use crate::core::{ArmState, Joint, JointAngles};
use crate::motion::secs;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod error;
pub mod player;
pub mod store;
pub mod validation;

pub use error::{LoadError, PoseViolation, SaveError};
pub use player::{ReplayMode, SequencePlayer};
pub use store::{SequenceFormat, SequenceStore, DEFAULT_SEQUENCE_PATH};

/// Duration stored with a freshly recorded pose, in seconds.
pub const DEFAULT_POSE_DURATION: f64 = 0.5;

/// Snapshot of all joint angles plus the time to hold it.
///
/// Poses are plain copies; capturing one never aliases the arm state it came
/// from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// One angle per joint, in joint index order
    pub angles: JointAngles,
    /// Seconds, strictly positive
    pub duration: f64,
}

impl Pose {
    pub fn new(angles: JointAngles, duration: f64) -> Self {
        Self { angles, duration }
    }

    /// Copy the arm's current commanded angles.
    pub fn capture(arm: &ArmState, duration: f64) -> Self {
        Self::new(arm.angles(), duration)
    }

    pub fn angle(&self, joint: Joint) -> f64 {
        self.angles[joint.index()]
    }

    /// The pose duration as a `Duration`; invalid values read as zero.
    pub fn dwell(&self) -> Duration {
        secs(self.duration)
    }
}

/// Ordered list of poses; insertion order is replay order.
///
/// Serializes as a bare array of pose records.
///
/// # Example
///
/// ```rust
/// use poseplay::core::{ArmState, Joint};
/// use poseplay::sequence::Sequence;
///
/// let mut arm = ArmState::new();
/// let mut sequence = Sequence::new();
///
/// sequence.record(&arm, 0.5);
/// arm.set(Joint::Shoulder, 120.0);
/// sequence.record(&arm, 0.5);
///
/// assert_eq!(sequence.len(), 2);
/// assert_eq!(sequence.poses()[1].angles, [90.0, 120.0, 90.0, 90.0]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence {
    poses: Vec<Pose>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_poses(poses: Vec<Pose>) -> Self {
        Self { poses }
    }

    /// Append a snapshot of `arm` held for `duration` seconds.
    pub fn record(&mut self, arm: &ArmState, duration: f64) -> &Pose {
        self.push(Pose::capture(arm, duration))
    }

    pub fn push(&mut self, pose: Pose) -> &Pose {
        self.poses.push(pose);
        &self.poses[self.poses.len() - 1]
    }

    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pose> {
        self.poses.iter()
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Sum of every pose's dwell.
    pub fn total_dwell(&self) -> Duration {
        self.poses.iter().map(Pose::dwell).sum()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Pose;
    type IntoIter = std::slice::Iter<'a, Pose>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}

impl From<Vec<Pose>> for Sequence {
    fn from(poses: Vec<Pose>) -> Self {
        Self::from_poses(poses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_copies_the_arm_state() {
        let mut arm = ArmState::new();
        let mut sequence = Sequence::new();

        sequence.record(&arm, DEFAULT_POSE_DURATION);
        arm.set(Joint::Base, 10.0);

        assert_eq!(sequence.poses()[0].angles, [90.0; 4]);
        assert_eq!(sequence.poses()[0].duration, 0.5);
    }

    #[test]
    fn preserves_insertion_order() {
        let mut sequence = Sequence::new();
        for i in 0..5 {
            sequence.push(Pose::new([f64::from(i); 4], 1.0));
        }

        let firsts: Vec<f64> = sequence.iter().map(|p| p.angles[0]).collect();
        assert_eq!(firsts, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn serializes_as_bare_array() {
        let sequence = Sequence::from_poses(vec![Pose::new([90.0, 120.0, 90.0, 90.0], 0.5)]);
        let json = serde_json::to_string(&sequence).unwrap();

        assert_eq!(
            json,
            r#"[{"angles":[90.0,120.0,90.0,90.0],"duration":0.5}]"#
        );
    }

    #[test]
    fn accepts_integer_angles() {
        let json = r#"[{"angles": [90, 120, 90, 90], "duration": 0.5}]"#;
        let sequence: Sequence = serde_json::from_str(json).unwrap();

        assert_eq!(sequence.poses()[0].angle(Joint::Shoulder), 120.0);
    }

    #[test]
    fn rejects_wrong_angle_count() {
        let json = r#"[{"angles": [90, 120, 90], "duration": 0.5}]"#;
        assert!(serde_json::from_str::<Sequence>(json).is_err());
    }

    #[test]
    fn total_dwell_sums_durations() {
        let sequence = Sequence::from_poses(vec![
            Pose::new([90.0; 4], 0.5),
            Pose::new([90.0; 4], 1.25),
        ]);
        assert_eq!(sequence.total_dwell(), Duration::from_millis(1750));
    }

    #[test]
    fn empty_sequence_is_valid() {
        let sequence = Sequence::new();
        assert!(sequence.is_empty());
        assert_eq!(sequence.total_dwell(), Duration::ZERO);
    }
}
