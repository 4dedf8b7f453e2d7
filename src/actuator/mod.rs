//! Actuator collaborator: one settable angle per joint.
//!
//! The motion core never talks to a bus directly. It issues fire-and-forget
//! angle commands through the [`Actuator`] trait and reads back whatever the
//! driver last committed. Pulse-width mapping and bus details stay behind
//! the trait.

mod calibration;
mod simulated;

pub use calibration::{ServoCalibration, DUTY_CYCLE_MAX};
pub use simulated::{ServoWrite, SimulatedActuator};

use crate::core::Joint;
use thiserror::Error;

/// Errors reported by an actuator driver.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActuatorError {
    /// The driver refused an angle outside its range
    #[error("Angle {angle} out of range for {joint}")]
    OutOfRange { joint: Joint, angle: f64 },

    /// The underlying bus or device reported a failure
    #[error("Bus error on {joint}: {message}")]
    Bus { joint: Joint, message: String },
}

/// Open-loop angle interface for the four arm joints.
pub trait Actuator {
    /// Command `joint` to `angle` degrees. Callers clamp to `[0, 180]` first.
    fn set_angle(&mut self, joint: Joint, angle: f64) -> Result<(), ActuatorError>;

    /// Angle the driver last committed for `joint`, or `None` if the channel
    /// has never been driven.
    fn get_angle(&self, joint: Joint) -> Option<f64>;
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    fn set_angle(&mut self, joint: Joint, angle: f64) -> Result<(), ActuatorError> {
        (**self).set_angle(joint, angle)
    }

    fn get_angle(&self, joint: Joint) -> Option<f64> {
        (**self).get_angle(joint)
    }
}

impl<A: Actuator + ?Sized> Actuator for Box<A> {
    fn set_angle(&mut self, joint: Joint, angle: f64) -> Result<(), ActuatorError> {
        (**self).set_angle(joint, angle)
    }

    fn get_angle(&self, joint: Joint) -> Option<f64> {
        (**self).get_angle(joint)
    }
}
