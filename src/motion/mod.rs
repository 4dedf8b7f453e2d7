//! Motion execution around the pure core.
//!
//! This module is the imperative shell: it turns angle targets into eased
//! trajectories, filters redundant actuator writes, and paces steps through
//! a pluggable [`Sleeper`].
//!
//! # Key Concepts
//!
//! - **Rig**: the actuator, commanded arm state, sleeper and cancel flag
//! - **Quiet writes**: commands within a noise tolerance are dropped
//! - **Trajectories**: smoothstep-eased moves of one joint or all joints
//! - **Cancellation**: a shared flag checked before every step

mod cancel;
mod error;
mod pacing;
mod quiet;
mod rig;
mod trajectory;

pub use cancel::CancelToken;
pub use error::MotionError;
pub use pacing::{secs, Sleeper, ThreadSleeper, VirtualClock};
pub use quiet::{QuietWriter, DEFAULT_TOLERANCE};
pub use rig::Rig;
pub use trajectory::{waypoint, TrajectoryPlayer, DEFAULT_DURATION, DEFAULT_STEPS};
