//! Poseplay: eased teleoperation and pose replay for a 4-DOF servo arm
//!
//! The arm has four joints (base, shoulder, elbow, gripper), each a hobby
//! servo commanded in degrees over `[0, 180]`. An operator jogs joints with
//! single keys, records snapshots of the commanded angles, saves them to a
//! file and replays them later.
//!
//! # Core Concepts
//!
//! - **Easing**: every move follows a smoothstep curve sampled at fixed steps
//! - **Quiet writes**: a write within tolerance of the current angle is dropped
//! - **Rig**: the actuator, commanded state, sleeper and cancel flag that a
//!   single motion borrows for its whole duration
//! - **Sequence**: ordered poses, persisted as JSON and validated on load
//!
//! # Example
//!
//! ```rust
//! use poseplay::actuator::SimulatedActuator;
//! use poseplay::controller::ArmController;
//! use poseplay::core::Joint;
//! use poseplay::motion::VirtualClock;
//!
//! let mut controller = ArmController::builder()
//!     .actuator(SimulatedActuator::new())
//!     .sleeper(VirtualClock::new())
//!     .build()
//!     .unwrap();
//!
//! controller.record_step();
//! controller.move_servo(Joint::Shoulder, 30.0).unwrap();
//! controller.record_step();
//!
//! assert_eq!(controller.state().angle(Joint::Shoulder), 120.0);
//! assert_eq!(controller.sequence().len(), 2);
//! ```

pub mod actuator;
pub mod builder;
pub mod config;
pub mod controller;
pub mod core;
pub mod dispatch;
pub mod motion;
pub mod sequence;

// Re-export commonly used types
pub use actuator::{Actuator, ActuatorError, SimulatedActuator};
pub use builder::{BuildError, ControllerBuilder};
pub use config::{ArmConfig, ConfigError};
pub use controller::{ArmController, Playback};
pub use core::{ArmState, Joint, JointAngles};
pub use dispatch::{dispatch, Command, Outcome};
pub use motion::{CancelToken, MotionError, Sleeper, TrajectoryPlayer};
pub use sequence::{Pose, Sequence, SequencePlayer, SequenceStore};
