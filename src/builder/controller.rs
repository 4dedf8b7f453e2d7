//! Builder for constructing arm controllers.

use crate::actuator::Actuator;
use crate::builder::error::BuildError;
use crate::config::ArmConfig;
use crate::controller::ArmController;
use crate::core::{ArmState, JointAngles};
use crate::motion::{Rig, Sleeper};
use crate::sequence::Sequence;

/// Builder for constructing arm controllers with a fluent API.
pub struct ControllerBuilder<A, S> {
    actuator: Option<A>,
    sleeper: Option<S>,
    config: ArmConfig,
    initial_angles: Option<JointAngles>,
    sequence: Sequence,
}

impl<A: Actuator, S: Sleeper> ControllerBuilder<A, S> {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            actuator: None,
            sleeper: None,
            config: ArmConfig::default(),
            initial_angles: None,
            sequence: Sequence::new(),
        }
    }

    /// Set the actuator driver (required).
    pub fn actuator(mut self, actuator: A) -> Self {
        self.actuator = Some(actuator);
        self
    }

    /// Set how the controller waits between motion steps (required).
    pub fn sleeper(mut self, sleeper: S) -> Self {
        self.sleeper = Some(sleeper);
        self
    }

    /// Replace the configuration.
    pub fn config(mut self, config: ArmConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from explicit commanded angles instead of home.
    pub fn initial_angles(mut self, angles: JointAngles) -> Self {
        self.initial_angles = Some(angles);
        self
    }

    /// Start with an already recorded sequence.
    pub fn sequence(mut self, sequence: Sequence) -> Self {
        self.sequence = sequence;
        self
    }

    /// Build the controller.
    /// Returns an error if required parts are missing or the config is invalid.
    pub fn build(self) -> Result<ArmController<A, S>, BuildError> {
        let actuator = self.actuator.ok_or(BuildError::MissingActuator)?;
        let sleeper = self.sleeper.ok_or(BuildError::MissingSleeper)?;
        self.config.validate()?;

        let state = self
            .initial_angles
            .map(ArmState::from_angles)
            .unwrap_or_default();
        let rig = Rig::with_state(actuator, sleeper, state);

        Ok(ArmController::from_parts(rig, self.sequence, self.config))
    }
}

impl<A: Actuator, S: Sleeper> Default for ControllerBuilder<A, S> {
    fn default() -> Self {
        Self::new()
    }
}
