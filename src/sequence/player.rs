//! Replay of recorded sequences.

use super::Sequence;
use crate::actuator::Actuator;
use crate::core::Joint;
use crate::motion::{MotionError, Rig, Sleeper, TrajectoryPlayer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How joints move within a single pose transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayMode {
    /// Each joint runs its full trajectory in turn, base first.
    #[default]
    Sequential,
    /// All joints advance one eased step per tick and arrive together; the
    /// pose duration governs the whole move.
    Interleaved,
}

/// Plays a [`Sequence`] back through a [`TrajectoryPlayer`].
///
/// Every transition starts from the joint's last commanded angle, and the
/// player holds each pose for its duration once all joints have been
/// driven.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SequencePlayer {
    trajectory: TrajectoryPlayer,
    mode: ReplayMode,
}

impl SequencePlayer {
    pub fn new(trajectory: TrajectoryPlayer, mode: ReplayMode) -> Self {
        Self { trajectory, mode }
    }

    pub fn mode(&self) -> ReplayMode {
        self.mode
    }

    pub fn trajectory(&self) -> &TrajectoryPlayer {
        &self.trajectory
    }

    /// Replay every pose in order and return how many were played.
    ///
    /// The sequence is only read. An empty sequence returns immediately
    /// without touching the actuator or the sleeper.
    pub fn replay<A: Actuator, S: Sleeper>(
        &self,
        rig: &mut Rig<A, S>,
        sequence: &Sequence,
    ) -> Result<usize, MotionError> {
        if sequence.is_empty() {
            debug!("empty sequence, nothing to replay");
            return Ok(0);
        }

        info!(
            poses = sequence.len(),
            mode = ?self.mode,
            dwell = ?sequence.total_dwell(),
            "replaying sequence"
        );
        for (step, pose) in sequence.iter().enumerate() {
            debug!(step, angles = ?pose.angles, duration = pose.duration, "replay step");

            match self.mode {
                ReplayMode::Sequential => {
                    for joint in Joint::ALL {
                        let from = rig.state.angle(joint);
                        self.trajectory
                            .move_smooth(rig, joint, from, pose.angle(joint))?;
                    }
                }
                ReplayMode::Interleaved => {
                    let from = rig.state.angles();
                    self.trajectory
                        .move_together(rig, from, pose.angles, pose.dwell())?;
                }
            }

            rig.cancel.check()?;
            rig.sleeper.sleep(pose.dwell());
        }

        Ok(sequence.len())
    }
}
