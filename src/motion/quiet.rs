//! Suppression of sub-threshold actuator writes.

use crate::actuator::{Actuator, ActuatorError};
use crate::core::{clamp_angle, ArmState, Joint};
use tracing::trace;

/// Default noise threshold in degrees.
pub const DEFAULT_TOLERANCE: f64 = 0.2;

/// Filters actuator writes that would not visibly move a joint.
///
/// Fine interpolation produces many commands a fraction of a degree apart.
/// Sending each one floods the bus and makes the servo chatter, so writes
/// within `tolerance` of the current angle are dropped.
///
/// # Example
///
/// ```rust
/// use poseplay::actuator::SimulatedActuator;
/// use poseplay::core::{ArmState, Joint};
/// use poseplay::motion::QuietWriter;
///
/// let mut actuator = SimulatedActuator::new();
/// let mut arm = ArmState::new();
/// let writer = QuietWriter::default();
///
/// // 90.1 is within 0.2 of the home angle: nothing is written.
/// assert!(!writer.write(&mut actuator, &mut arm, Joint::Base, 90.1).unwrap());
/// assert!(writer.write(&mut actuator, &mut arm, Joint::Base, 95.0).unwrap());
/// assert_eq!(actuator.write_count(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuietWriter {
    tolerance: f64,
}

impl Default for QuietWriter {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl QuietWriter {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Write `target` to `joint` unless it is within tolerance of the
    /// current angle.
    ///
    /// The current angle is what the actuator reports, falling back to the
    /// commanded angle in `arm`. Returns whether a write was issued; at most
    /// one write happens per call, and `arm` is updated only when it does.
    pub fn write<A: Actuator + ?Sized>(
        &self,
        actuator: &mut A,
        arm: &mut ArmState,
        joint: Joint,
        target: f64,
    ) -> Result<bool, ActuatorError> {
        let target = clamp_angle(target);
        let current = actuator
            .get_angle(joint)
            .unwrap_or_else(|| arm.angle(joint));

        if (current - target).abs() <= self.tolerance {
            trace!(%joint, current, target, "write suppressed");
            return Ok(false);
        }

        actuator.set_angle(joint, target)?;
        arm.set(joint, target);
        Ok(true)
    }
}
