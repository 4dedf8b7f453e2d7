//! In-memory actuator that records every write.

use super::{Actuator, ActuatorError, ServoCalibration};
use crate::core::{is_valid_angle, Joint, JointAngles};
use std::collections::VecDeque;
use tracing::trace;

/// A single command that reached the actuator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ServoWrite {
    pub joint: Joint,
    pub angle: f64,
    /// Pulse width the command maps to under the actuator's calibration
    pub pulse_us: f64,
    /// 16-bit PWM register value for that pulse
    pub duty: u16,
}

/// Actuator that keeps committed angles in memory.
///
/// Used for dry runs without hardware and as the observable end of every
/// motion test: the write log shows exactly which commands would have hit
/// the bus. The log is unbounded unless capped with
/// [`with_write_log_limit`](Self::with_write_log_limit), in which case the
/// oldest writes are dropped first.
///
/// # Example
///
/// ```rust
/// use poseplay::actuator::{Actuator, SimulatedActuator};
/// use poseplay::core::Joint;
///
/// let mut servo = SimulatedActuator::new();
/// assert_eq!(servo.get_angle(Joint::Base), None);
///
/// servo.set_angle(Joint::Base, 45.0).unwrap();
/// assert_eq!(servo.get_angle(Joint::Base), Some(45.0));
/// assert_eq!(servo.write_count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulatedActuator {
    calibration: ServoCalibration,
    angles: [Option<f64>; Joint::COUNT],
    writes: VecDeque<ServoWrite>,
    log_limit: Option<usize>,
}

impl SimulatedActuator {
    /// Actuator with every channel undriven.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific pulse calibration for the write log.
    pub fn with_calibration(mut self, calibration: ServoCalibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Pre-position every channel without logging writes.
    pub fn with_angles(mut self, angles: JointAngles) -> Self {
        self.angles = angles.map(Some);
        self
    }

    /// Keep at most `limit` writes in the log.
    pub fn with_write_log_limit(mut self, limit: usize) -> Self {
        self.log_limit = Some(limit);
        self.trim_log();
        self
    }

    /// Logged writes, oldest first.
    pub fn writes(&self) -> impl Iterator<Item = &ServoWrite> + '_ {
        self.writes.iter()
    }

    /// Angles written to one joint, in order.
    pub fn writes_for(&self, joint: Joint) -> Vec<f64> {
        self.writes
            .iter()
            .filter(|w| w.joint == joint)
            .map(|w| w.angle)
            .collect()
    }

    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    fn trim_log(&mut self) {
        if let Some(limit) = self.log_limit {
            while self.writes.len() > limit {
                self.writes.pop_front();
            }
        }
    }
}

impl Actuator for SimulatedActuator {
    fn set_angle(&mut self, joint: Joint, angle: f64) -> Result<(), ActuatorError> {
        if !is_valid_angle(angle) {
            return Err(ActuatorError::OutOfRange { joint, angle });
        }

        let pulse_us = self.calibration.pulse_width_us(angle);
        let duty = self.calibration.duty_cycle(angle);
        trace!(%joint, angle, pulse_us, duty, "servo write");

        self.angles[joint.index()] = Some(angle);
        self.writes.push_back(ServoWrite {
            joint,
            angle,
            pulse_us,
            duty,
        });
        self.trim_log();
        Ok(())
    }

    fn get_angle(&self, joint: Joint) -> Option<f64> {
        self.angles[joint.index()]
    }
}
