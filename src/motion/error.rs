//! Motion error types.

use crate::actuator::ActuatorError;
use thiserror::Error;

/// Errors that stop a trajectory or replay early
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MotionError {
    /// The actuator refused or failed a write
    #[error("Actuator failed: {0}")]
    Actuator(#[from] ActuatorError),

    /// Cancellation was requested between steps
    #[error("Motion cancelled")]
    Cancelled,
}
