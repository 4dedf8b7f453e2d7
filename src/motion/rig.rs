//! The hardware-facing side of the arm.

use super::cancel::CancelToken;
use super::pacing::Sleeper;
use crate::actuator::{Actuator, ActuatorError};
use crate::core::{ArmState, Joint};
use tracing::debug;

/// Actuator, commanded state, sleeper and cancel flag moved around together.
///
/// Trajectory and sequence players borrow a rig mutably for the length of a
/// move, so only one motion can drive the arm at a time.
pub struct Rig<A, S> {
    pub actuator: A,
    pub state: ArmState,
    pub sleeper: S,
    pub cancel: CancelToken,
}

impl<A: Actuator, S: Sleeper> Rig<A, S> {
    /// Rig with every joint commanded to the home angle.
    pub fn new(actuator: A, sleeper: S) -> Self {
        Self::with_state(actuator, sleeper, ArmState::new())
    }

    pub fn with_state(actuator: A, sleeper: S, state: ArmState) -> Self {
        Self {
            actuator,
            state,
            sleeper,
            cancel: CancelToken::new(),
        }
    }

    /// Current angle of `joint`.
    ///
    /// The actuator's committed angle wins; a channel that was never driven
    /// falls back to the cached commanded angle, which starts at home.
    pub fn observed_angle(&self, joint: Joint) -> f64 {
        self.actuator
            .get_angle(joint)
            .unwrap_or_else(|| self.state.angle(joint))
    }

    /// Write every joint's commanded angle straight to the actuator.
    pub fn home(&mut self) -> Result<(), ActuatorError> {
        for joint in Joint::ALL {
            let angle = self.state.angle(joint);
            self.actuator.set_angle(joint, angle)?;
        }
        debug!(angles = ?self.state.angles(), "homed arm");
        Ok(())
    }
}
