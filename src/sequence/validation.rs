//! Pose checks run on every loaded sequence.
//!
//! Checks use Stillwater's `Validation` so a bad file reports every
//! offending pose in one pass instead of stopping at the first.

use super::error::PoseViolation;
use super::{Pose, Sequence};
use crate::core::{is_valid_angle, Joint};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Check one pose: every angle inside the joint domain, duration positive.
pub fn validate_pose(index: usize, pose: &Pose) -> Validation<(), NonEmptyVec<PoseViolation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<PoseViolation>>> = Vec::new();

    for joint in Joint::ALL {
        let angle = pose.angle(joint);
        let check = if is_valid_angle(angle) {
            Validation::success(())
        } else {
            Validation::fail(PoseViolation::AngleOutOfRange {
                pose: index,
                joint,
                angle,
            })
        };
        checks.push(check);
    }

    let duration_check = if pose.duration.is_finite() && pose.duration > 0.0 {
        Validation::success(())
    } else {
        Validation::fail(PoseViolation::NonPositiveDuration {
            pose: index,
            duration: pose.duration,
        })
    };
    checks.push(duration_check);

    Validation::all_vec(checks).map(|_| ())
}

/// Check every pose in `sequence`, accumulating ALL violations.
pub fn validate_sequence(sequence: &Sequence) -> Validation<(), NonEmptyVec<PoseViolation>> {
    if sequence.is_empty() {
        return Validation::success(());
    }

    let checks: Vec<_> = sequence
        .iter()
        .enumerate()
        .map(|(index, pose)| validate_pose(index, pose))
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

/// [`validate_sequence`] flattened into a plain list of violations.
pub fn check_sequence(sequence: &Sequence) -> Result<(), Vec<PoseViolation>> {
    match validate_sequence(sequence) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
    }
}
