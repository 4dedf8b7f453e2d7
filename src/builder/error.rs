//! Build errors for the controller builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building an arm controller.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Actuator not specified. Call .actuator(driver) before .build()")]
    MissingActuator,

    #[error("Sleeper not specified. Call .sleeper(sleeper) before .build()")]
    MissingSleeper,

    #[error("Configuration rejected: {0}")]
    InvalidConfig(#[from] ConfigError),
}
