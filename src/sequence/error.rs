//! Sequence persistence error types.

use crate::core::Joint;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a sequence
#[derive(Debug, Error)]
pub enum SaveError {
    /// Encoding to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The destination could not be written
    #[error("Cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while reading a sequence back
#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing has been saved at this location yet
    #[error("No sequence at {}", path.display())]
    Missing { path: PathBuf },

    /// The file exists but could not be read
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decoding from JSON or binary format failed
    #[error("Malformed sequence in {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    /// The content decoded but describes poses the arm cannot play
    #[error("Invalid sequence in {}: {} violation(s)", path.display(), violations.len())]
    Invalid {
        path: PathBuf,
        violations: Vec<PoseViolation>,
    },
}

/// A reason a decoded pose cannot be replayed
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PoseViolation {
    #[error("Pose {pose}: {joint} angle {angle} outside 0..=180")]
    AngleOutOfRange { pose: usize, joint: Joint, angle: f64 },

    #[error("Pose {pose}: duration {duration} must be a positive number of seconds")]
    NonPositiveDuration { pose: usize, duration: f64 },
}
