//! Eased point-to-point trajectories.

use super::error::MotionError;
use super::pacing::Sleeper;
use super::quiet::QuietWriter;
use super::rig::Rig;
use crate::actuator::Actuator;
use crate::core::{clamp_angle, ease, Joint, JointAngles};
use std::time::Duration;
use tracing::debug;

/// Default number of interpolation steps per move.
pub const DEFAULT_STEPS: u32 = 25;

/// Default length of a single-joint move.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

/// Angle at step `i` of `steps` on an eased path from `from` to `to`.
///
/// The last step returns `to` itself rather than re-deriving it, so a
/// trajectory always converges on the exact target.
pub fn waypoint(from: f64, to: f64, i: u32, steps: u32) -> f64 {
    if i >= steps {
        return to;
    }
    let t = f64::from(i) / f64::from(steps);
    from + (to - from) * ease(t)
}

/// Drives joints along eased trajectories through a [`QuietWriter`].
///
/// A move of `steps` steps issues `steps + 1` quiet writes (`t = 0` through
/// `t = 1`) with a wait of `duration / steps` after each one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryPlayer {
    steps: u32,
    duration: Duration,
    writer: QuietWriter,
}

impl Default for TrajectoryPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_STEPS, DEFAULT_DURATION)
    }
}

impl TrajectoryPlayer {
    /// A player with `steps` interpolation steps (at least one) per
    /// `duration`.
    pub fn new(steps: u32, duration: Duration) -> Self {
        Self {
            steps: steps.max(1),
            duration,
            writer: QuietWriter::default(),
        }
    }

    pub fn with_writer(mut self, writer: QuietWriter) -> Self {
        self.writer = writer;
        self
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn writer(&self) -> &QuietWriter {
        &self.writer
    }

    /// Wait between consecutive steps.
    pub fn step_delay(&self) -> Duration {
        self.duration / self.steps
    }

    /// Every angle a move from `from` to `to` requests, in order.
    pub fn waypoints(&self, from: f64, to: f64) -> impl Iterator<Item = f64> {
        let steps = self.steps;
        (0..=steps).map(move |i| waypoint(from, to, i, steps))
    }

    /// Move one joint from `from` to `to` over the configured duration.
    ///
    /// Checks the rig's cancel token before every step. On completion the
    /// joint's commanded angle is `to`; on cancellation it is whatever was
    /// last written.
    pub fn move_smooth<A: Actuator, S: Sleeper>(
        &self,
        rig: &mut Rig<A, S>,
        joint: Joint,
        from: f64,
        to: f64,
    ) -> Result<(), MotionError> {
        let from = clamp_angle(from);
        let to = clamp_angle(to);
        let delay = self.step_delay();
        debug!(%joint, from, to, steps = self.steps, "smooth move");

        for angle in self.waypoints(from, to) {
            rig.cancel.check()?;
            self.writer
                .write(&mut rig.actuator, &mut rig.state, joint, angle)?;
            rig.sleeper.sleep(delay);
        }

        rig.state.set(joint, to);
        Ok(())
    }

    /// Jog a joint by `delta` degrees, saturating at the joint limits.
    ///
    /// The jog starts from the joint's commanded angle, not the actuator
    /// readback, so repeated jogs land on exact multiples of `delta`.
    /// Returns the angle the joint was driven to.
    pub fn move_servo<A: Actuator, S: Sleeper>(
        &self,
        rig: &mut Rig<A, S>,
        joint: Joint,
        delta: f64,
    ) -> Result<f64, MotionError> {
        let current = rig.state.angle(joint);
        let target = clamp_angle(current + delta);
        self.move_smooth(rig, joint, current, target)?;
        Ok(target)
    }

    /// Move all joints together, one eased step across every joint per tick.
    ///
    /// `duration` covers the whole multi-joint move; the player's own
    /// duration is not used.
    pub fn move_together<A: Actuator, S: Sleeper>(
        &self,
        rig: &mut Rig<A, S>,
        from: JointAngles,
        to: JointAngles,
        duration: Duration,
    ) -> Result<(), MotionError> {
        let from = from.map(clamp_angle);
        let to = to.map(clamp_angle);
        let delay = duration / self.steps;
        debug!(?from, ?to, steps = self.steps, "interleaved move");

        for i in 0..=self.steps {
            rig.cancel.check()?;
            for joint in Joint::ALL {
                let j = joint.index();
                let angle = waypoint(from[j], to[j], i, self.steps);
                self.writer
                    .write(&mut rig.actuator, &mut rig.state, joint, angle)?;
            }
            rig.sleeper.sleep(delay);
        }

        for joint in Joint::ALL {
            rig.state.set(joint, to[joint.index()]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::{ActuatorError, SimulatedActuator};
    use crate::core::ArmState;
    use crate::motion::{CancelToken, VirtualClock, DEFAULT_TOLERANCE};

    fn homed_rig() -> Rig<SimulatedActuator, VirtualClock> {
        Rig::new(
            SimulatedActuator::new().with_angles([90.0; 4]),
            VirtualClock::new(),
        )
    }

    /// Sleeper that trips a cancel token after a number of naps.
    struct CancelAfter {
        token: CancelToken,
        remaining: usize,
    }

    impl Sleeper for CancelAfter {
        fn sleep(&mut self, _duration: Duration) {
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.token.cancel();
            }
        }
    }

    struct BrokenBus;

    impl Actuator for BrokenBus {
        fn set_angle(&mut self, joint: Joint, _angle: f64) -> Result<(), ActuatorError> {
            Err(ActuatorError::Bus {
                joint,
                message: "no ack".to_string(),
            })
        }

        fn get_angle(&self, _joint: Joint) -> Option<f64> {
            None
        }
    }

    #[test]
    fn waypoints_start_at_from_and_end_at_to() {
        let player = TrajectoryPlayer::default();
        let points: Vec<f64> = player.waypoints(0.1, 0.7).collect();

        assert_eq!(points.len(), 26);
        assert_eq!(points[0], 0.1);
        assert_eq!(points[25], 0.7);
    }

    #[test]
    fn waypoints_follow_the_easing_curve() {
        let player = TrajectoryPlayer::new(4, DEFAULT_DURATION);
        let points: Vec<f64> = player.waypoints(0.0, 100.0).collect();

        assert_eq!(points, vec![0.0, 15.625, 50.0, 84.375, 100.0]);
    }

    #[test]
    fn final_step_requests_exact_target_for_any_step_count() {
        for steps in [1, 25, 100] {
            let player = TrajectoryPlayer::new(steps, DEFAULT_DURATION);
            assert_eq!(player.waypoints(90.0, 137.3).last(), Some(137.3));

            let mut rig = homed_rig();
            player
                .with_writer(QuietWriter::new(0.0))
                .move_smooth(&mut rig, Joint::Elbow, 90.0, 137.3)
                .unwrap();

            let writes = rig.actuator.writes_for(Joint::Elbow);
            assert_eq!(writes.last().copied(), Some(137.3), "steps = {steps}");
            assert_eq!(rig.state.angle(Joint::Elbow), 137.3);
        }
    }

    #[test]
    fn default_tolerance_lands_within_tolerance_of_target() {
        for steps in [1, 25, 100] {
            let mut rig = homed_rig();
            TrajectoryPlayer::new(steps, DEFAULT_DURATION)
                .move_smooth(&mut rig, Joint::Elbow, 90.0, 137.3)
                .unwrap();

            let reached = rig.actuator.get_angle(Joint::Elbow).unwrap();
            assert!((reached - 137.3).abs() <= 0.2, "steps = {steps}");
        }
    }

    #[test]
    fn paces_one_sleep_per_step() {
        let mut rig = homed_rig();
        let player = TrajectoryPlayer::default();

        player
            .move_smooth(&mut rig, Joint::Base, 90.0, 45.0)
            .unwrap();

        assert_eq!(player.step_delay(), Duration::from_millis(20));
        assert_eq!(rig.sleeper.naps(), 26);
        assert_eq!(rig.sleeper.elapsed(), Duration::from_millis(520));
    }

    #[test]
    fn move_to_current_angle_writes_nothing() {
        let mut rig = homed_rig();
        TrajectoryPlayer::default()
            .move_smooth(&mut rig, Joint::Gripper, 90.0, 90.0)
            .unwrap();

        assert_eq!(rig.actuator.write_count(), 0);
    }

    #[test]
    fn move_servo_saturates_at_upper_limit() {
        let angles = [90.0, 178.0, 90.0, 90.0];
        let actuator = SimulatedActuator::new().with_angles(angles);
        let mut rig = Rig::with_state(actuator, VirtualClock::new(), ArmState::from_angles(angles));

        let angle = TrajectoryPlayer::default()
            .move_servo(&mut rig, Joint::Shoulder, 5.0)
            .unwrap();

        assert_eq!(angle, 180.0);
        assert_eq!(rig.state.angle(Joint::Shoulder), 180.0);
        let reached = rig.actuator.get_angle(Joint::Shoulder).unwrap();
        assert!(reached <= 180.0 && 180.0 - reached <= DEFAULT_TOLERANCE);
    }

    #[test]
    fn move_servo_saturates_at_lower_limit() {
        let angles = [3.0, 90.0, 90.0, 90.0];
        let actuator = SimulatedActuator::new().with_angles(angles);
        let mut rig = Rig::with_state(actuator, VirtualClock::new(), ArmState::from_angles(angles));

        let angle = TrajectoryPlayer::default()
            .move_servo(&mut rig, Joint::Base, -5.0)
            .unwrap();

        assert_eq!(angle, 0.0);
        assert_eq!(rig.state.angle(Joint::Base), 0.0);
        let reached = rig.actuator.get_angle(Joint::Base).unwrap();
        assert!(reached >= 0.0 && reached <= DEFAULT_TOLERANCE);
    }

    #[test]
    fn exact_writer_lands_on_the_limit() {
        let angles = [90.0, 178.0, 90.0, 90.0];
        let actuator = SimulatedActuator::new().with_angles(angles);
        let mut rig = Rig::with_state(actuator, VirtualClock::new(), ArmState::from_angles(angles));

        TrajectoryPlayer::default()
            .with_writer(QuietWriter::new(0.0))
            .move_servo(&mut rig, Joint::Shoulder, 5.0)
            .unwrap();

        assert_eq!(rig.actuator.get_angle(Joint::Shoulder), Some(180.0));
    }

    #[test]
    fn repeated_jogs_land_on_exact_increments() {
        let mut rig = homed_rig();
        let player = TrajectoryPlayer::default();

        for expected in [95.0, 100.0, 105.0] {
            let angle = player.move_servo(&mut rig, Joint::Base, 5.0).unwrap();
            assert_eq!(angle, expected);
        }
        assert_eq!(rig.state.angle(Joint::Base), 105.0);
    }

    #[test]
    fn move_servo_on_undriven_channel_starts_from_home() {
        let mut rig = Rig::new(SimulatedActuator::new(), VirtualClock::new());

        let angle = TrajectoryPlayer::default()
            .move_servo(&mut rig, Joint::Elbow, 5.0)
            .unwrap();

        assert_eq!(angle, 95.0);
        assert_eq!(rig.state.angle(Joint::Elbow), 95.0);
        let reached = rig.actuator.get_angle(Joint::Elbow).unwrap();
        assert!((reached - 95.0).abs() <= DEFAULT_TOLERANCE, "reached {reached}");
    }

    #[test]
    fn cancelled_token_stops_before_any_write() {
        let mut rig = homed_rig();
        rig.cancel.cancel();

        let result = TrajectoryPlayer::default().move_smooth(&mut rig, Joint::Base, 90.0, 10.0);

        assert_eq!(result, Err(MotionError::Cancelled));
        assert_eq!(rig.actuator.write_count(), 0);
        assert_eq!(rig.state.angle(Joint::Base), 90.0);
    }

    #[test]
    fn cancellation_mid_move_leaves_last_written_angle() {
        let token = CancelToken::new();
        let sleeper = CancelAfter {
            token: token.clone(),
            remaining: 10,
        };
        let mut rig = Rig::new(SimulatedActuator::new().with_angles([90.0; 4]), sleeper);
        rig.cancel = token;

        let result = TrajectoryPlayer::default().move_smooth(&mut rig, Joint::Base, 90.0, 10.0);

        assert_eq!(result, Err(MotionError::Cancelled));
        let last = rig.actuator.writes_for(Joint::Base).last().copied().unwrap();
        assert!(last > 10.0 && last < 90.0);
        assert_eq!(rig.state.angle(Joint::Base), last);
    }

    #[test]
    fn actuator_failure_propagates() {
        let mut rig = Rig::new(BrokenBus, VirtualClock::new());

        let result = TrajectoryPlayer::default().move_smooth(&mut rig, Joint::Base, 90.0, 120.0);

        assert!(matches!(
            result,
            Err(MotionError::Actuator(ActuatorError::Bus { .. }))
        ));
    }

    #[test]
    fn move_together_interleaves_joints_per_tick() {
        let mut rig = homed_rig();
        let player = TrajectoryPlayer::default();

        player
            .move_together(
                &mut rig,
                [90.0; 4],
                [0.0, 180.0, 0.0, 180.0],
                Duration::from_secs(1),
            )
            .unwrap();

        let joints: Vec<Joint> = rig.actuator.writes().take(4).map(|w| w.joint).collect();
        assert_eq!(joints, Joint::ALL.to_vec());
        assert_eq!(rig.state.angles(), [0.0, 180.0, 0.0, 180.0]);
        assert_eq!(rig.sleeper.naps(), 26);
        assert_eq!(rig.sleeper.elapsed(), Duration::from_millis(1040));
    }
}
