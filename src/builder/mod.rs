//! Builder API for assembling an arm controller.
//!
//! The controller needs an actuator and a sleeper; configuration, starting
//! angles and a pre-recorded sequence are optional.

pub mod controller;
pub mod error;

pub use controller::ControllerBuilder;
pub use error::BuildError;
