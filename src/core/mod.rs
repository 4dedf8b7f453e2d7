//! Pure core types for arm motion.
//!
//! This module contains the side-effect free building blocks:
//! - Joint identities and the clamped angle domain
//! - The smoothstep easing curve
//! - The last-commanded angle per joint
//!
//! Nothing here touches hardware or sleeps; the `motion` module wraps these
//! types with actuator writes and timing.

mod arm;
mod easing;
mod joint;

pub use arm::ArmState;
pub use easing::ease;
pub use joint::{
    clamp_angle, is_valid_angle, Joint, JointAngles, HOME_ANGLE, MAX_ANGLE, MIN_ANGLE,
};
