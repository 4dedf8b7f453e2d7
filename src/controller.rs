//! Arm controller that owns the arm state and the recorded sequence.

use crate::actuator::{Actuator, ActuatorError};
use crate::builder::ControllerBuilder;
use crate::config::ArmConfig;
use crate::core::{ArmState, Joint};
use crate::motion::{CancelToken, MotionError, Rig, Sleeper, TrajectoryPlayer};
use crate::sequence::{LoadError, Pose, SaveError, Sequence, SequencePlayer, SequenceStore};
use tracing::{info, warn};

/// Result of a load-then-replay request.
///
/// A failed load is not fatal: an empty sequence is replayed instead and the
/// load error is handed back for the operator.
#[derive(Debug)]
pub struct Playback {
    pub load_error: Option<LoadError>,
    pub result: Result<usize, MotionError>,
}

/// Owns the rig and the sequence for one arm.
///
/// Every operator command lands here. Motion borrows the rig for its
/// duration, so manual jogs and replay can never interleave.
pub struct ArmController<A, S> {
    rig: Rig<A, S>,
    sequence: Sequence,
    store: SequenceStore,
    trajectory: TrajectoryPlayer,
    player: SequencePlayer,
    config: ArmConfig,
}

impl<A: Actuator, S: Sleeper> ArmController<A, S> {
    /// Start a [`ControllerBuilder`].
    pub fn builder() -> ControllerBuilder<A, S> {
        ControllerBuilder::new()
    }

    pub(crate) fn from_parts(rig: Rig<A, S>, sequence: Sequence, config: ArmConfig) -> Self {
        Self {
            rig,
            sequence,
            store: config.sequence_store(),
            trajectory: config.trajectory_player(),
            player: config.sequence_player(),
            config,
        }
    }

    pub fn config(&self) -> &ArmConfig {
        &self.config
    }

    pub fn rig(&self) -> &Rig<A, S> {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut Rig<A, S> {
        &mut self.rig
    }

    pub fn state(&self) -> &ArmState {
        &self.rig.state
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn store(&self) -> &SequenceStore {
        &self.store
    }

    /// Handle for stopping in-flight motion from a watcher.
    pub fn cancel_token(&self) -> CancelToken {
        self.rig.cancel.clone()
    }

    /// Drive every joint to its commanded angle without easing.
    pub fn home(&mut self) -> Result<(), ActuatorError> {
        self.rig.home()
    }

    /// Jog `joint` by `delta` degrees, saturating at the joint limits.
    pub fn move_servo(&mut self, joint: Joint, delta: f64) -> Result<f64, MotionError> {
        self.rig.cancel.reset();
        self.trajectory
            .move_servo(&mut self.rig, joint, delta)
            .inspect_err(|err| warn!(%joint, error = %err, "jog stopped early"))
    }

    /// Jog by the configured step; `sign` picks the direction.
    pub fn jog(&mut self, joint: Joint, sign: f64) -> Result<f64, MotionError> {
        let delta = self.config.jog_step_deg.abs() * sign.signum();
        self.move_servo(joint, delta)
    }

    /// Append a snapshot of the current arm state to the sequence.
    pub fn record_step(&mut self) -> Pose {
        let pose = *self
            .sequence
            .record(&self.rig.state, self.config.pose_duration_secs);
        info!(index = self.sequence.len() - 1, angles = ?pose.angles, "pose recorded");
        pose
    }

    /// Persist the sequence; on failure the in-memory sequence is untouched.
    pub fn save(&self) -> Result<(), SaveError> {
        self.store.save(&self.sequence).inspect_err(|err| {
            warn!(error = %err, "save failed");
        })
    }

    /// Replace the in-memory sequence with the stored one.
    pub fn load(&mut self) -> Result<usize, LoadError> {
        self.sequence = self.store.load()?;
        Ok(self.sequence.len())
    }

    /// Load the stored sequence and replay it.
    ///
    /// On a failed load an empty sequence is replayed (a no-op) and the
    /// in-memory sequence is kept; on success the loaded sequence replaces
    /// it.
    pub fn load_and_replay(&mut self) -> Playback {
        let (loaded, load_error) = self.store.load_or_empty();

        self.rig.cancel.reset();
        let result = self.player.replay(&mut self.rig, &loaded);
        if let Err(err) = &result {
            warn!(error = %err, "replay stopped early");
        }

        if load_error.is_none() {
            self.sequence = loaded;
        }
        Playback { load_error, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::SimulatedActuator;
    use crate::motion::VirtualClock;
    use std::fs;
    use tempfile::tempdir;

    fn controller_at(
        path: std::path::PathBuf,
    ) -> ArmController<SimulatedActuator, VirtualClock> {
        let config = ArmConfig {
            sequence_path: path,
            ..ArmConfig::default()
        };
        ArmController::builder()
            .actuator(SimulatedActuator::new())
            .sleeper(VirtualClock::new())
            .config(config)
            .build()
            .unwrap()
    }

    #[test]
    fn jog_uses_configured_step() {
        let dir = tempdir().unwrap();
        let mut controller = controller_at(dir.path().join("s.json"));

        assert_eq!(controller.jog(Joint::Base, 1.0).unwrap(), 95.0);
        assert_eq!(controller.jog(Joint::Base, -1.0).unwrap(), 90.0);
        assert_eq!(controller.jog(Joint::Base, -1.0).unwrap(), 85.0);
    }

    #[test]
    fn record_step_snapshots_commanded_angles() {
        let dir = tempdir().unwrap();
        let mut controller = controller_at(dir.path().join("s.json"));

        controller.record_step();
        controller.move_servo(Joint::Elbow, 20.0).unwrap();
        let pose = controller.record_step();

        assert_eq!(pose.angles, [90.0, 90.0, 110.0, 90.0]);
        assert_eq!(pose.duration, 0.5);
        assert_eq!(controller.sequence().len(), 2);
        assert_eq!(controller.sequence().poses()[0].angles, [90.0; 4]);
    }

    #[test]
    fn failed_save_keeps_sequence() {
        let dir = tempdir().unwrap();
        let mut controller = controller_at(dir.path().join("missing").join("s.json"));
        controller.record_step();

        assert!(controller.save().is_err());
        assert_eq!(controller.sequence().len(), 1);
    }

    #[test]
    fn failed_load_replays_nothing_and_keeps_sequence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, "[{]").unwrap();
        let mut controller = controller_at(path);
        controller.record_step();

        let playback = controller.load_and_replay();

        assert!(matches!(playback.load_error, Some(LoadError::Malformed { .. })));
        assert_eq!(playback.result.unwrap(), 0);
        assert_eq!(controller.rig().actuator.write_count(), 0);
        assert_eq!(controller.sequence().len(), 1);
    }

    #[test]
    fn successful_load_replaces_sequence() {
        let dir = tempdir().unwrap();
        let mut controller = controller_at(dir.path().join("s.json"));
        controller.record_step();
        controller.save().unwrap();
        controller.record_step();
        assert_eq!(controller.sequence().len(), 2);

        assert_eq!(controller.load().unwrap(), 1);
        assert_eq!(controller.sequence().len(), 1);
    }

    #[test]
    fn stale_cancellation_does_not_block_new_commands() {
        let dir = tempdir().unwrap();
        let mut controller = controller_at(dir.path().join("s.json"));

        controller.cancel_token().cancel();
        assert_eq!(controller.move_servo(Joint::Gripper, 10.0).unwrap(), 100.0);
    }

    #[test]
    fn home_writes_all_joints() {
        let dir = tempdir().unwrap();
        let mut controller = controller_at(dir.path().join("s.json"));

        controller.home().unwrap();
        assert_eq!(controller.rig().actuator.write_count(), 4);
    }

    #[test]
    fn long_jog_session_keeps_write_log_bounded() {
        let dir = tempdir().unwrap();
        let mut controller = ArmController::builder()
            .actuator(SimulatedActuator::new().with_write_log_limit(64))
            .sleeper(VirtualClock::new())
            .config(ArmConfig {
                sequence_path: dir.path().join("s.json"),
                ..ArmConfig::default()
            })
            .build()
            .unwrap();

        for i in 0..2000 {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            controller.jog(Joint::Base, sign).unwrap();
        }

        assert_eq!(controller.rig().actuator.write_count(), 64);
        assert_eq!(controller.state().angle(Joint::Base), 90.0);
    }
}
