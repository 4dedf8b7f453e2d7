//! Runtime configuration for the arm controller.
//!
//! Configuration is a JSON document; every field is optional and falls back
//! to the defaults below, so an empty object `{}` is a valid config.

use crate::actuator::ServoCalibration;
use crate::motion::{secs, QuietWriter, TrajectoryPlayer, DEFAULT_STEPS, DEFAULT_TOLERANCE};
use crate::sequence::{
    ReplayMode, SequencePlayer, SequenceStore, DEFAULT_POSE_DURATION, DEFAULT_SEQUENCE_PATH,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Degrees moved per jog key press.
pub const DEFAULT_JOG_STEP: f64 = 5.0;

/// Errors raised while reading or checking configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunables for motion, recording and persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmConfig {
    /// Interpolation steps per single-joint move
    pub trajectory_steps: u32,
    /// Length of a single-joint move in seconds
    pub trajectory_duration_secs: f64,
    /// Writes closer than this to the current angle are dropped
    pub quiet_tolerance_deg: f64,
    /// Degrees per jog command
    pub jog_step_deg: f64,
    /// Hold time stored with each recorded pose
    pub pose_duration_secs: f64,
    pub replay_mode: ReplayMode,
    pub sequence_path: PathBuf,
    /// Drive every joint to its commanded angle at start-up
    pub home_on_start: bool,
    pub calibration: ServoCalibration,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            trajectory_steps: DEFAULT_STEPS,
            trajectory_duration_secs: 0.5,
            quiet_tolerance_deg: DEFAULT_TOLERANCE,
            jog_step_deg: DEFAULT_JOG_STEP,
            pose_duration_secs: DEFAULT_POSE_DURATION,
            replay_mode: ReplayMode::Sequential,
            sequence_path: PathBuf::from(DEFAULT_SEQUENCE_PATH),
            home_on_start: true,
            calibration: ServoCalibration::default(),
        }
    }
}

impl ArmConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the motion engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trajectory_steps == 0 {
            return Err(ConfigError::Invalid(
                "trajectory_steps must be at least 1".to_string(),
            ));
        }
        if !(self.trajectory_duration_secs.is_finite() && self.trajectory_duration_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "trajectory_duration_secs must be positive, got {}",
                self.trajectory_duration_secs
            )));
        }
        if !(self.pose_duration_secs.is_finite() && self.pose_duration_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "pose_duration_secs must be positive, got {}",
                self.pose_duration_secs
            )));
        }
        if !(self.quiet_tolerance_deg.is_finite() && self.quiet_tolerance_deg >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "quiet_tolerance_deg must be zero or more, got {}",
                self.quiet_tolerance_deg
            )));
        }
        if !self.jog_step_deg.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "jog_step_deg must be finite, got {}",
                self.jog_step_deg
            )));
        }
        let cal = &self.calibration;
        if cal.min_pulse_us >= cal.max_pulse_us {
            return Err(ConfigError::Invalid(format!(
                "calibration pulse window {}..{} us is empty",
                cal.min_pulse_us, cal.max_pulse_us
            )));
        }
        if cal.frequency_hz == 0 {
            return Err(ConfigError::Invalid(
                "calibration frequency_hz must be non-zero".to_string(),
            ));
        }
        if !(cal.actuation_range_deg.is_finite() && cal.actuation_range_deg > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "calibration actuation_range_deg must be positive, got {}",
                cal.actuation_range_deg
            )));
        }
        Ok(())
    }

    pub fn quiet_writer(&self) -> QuietWriter {
        QuietWriter::new(self.quiet_tolerance_deg)
    }

    pub fn trajectory_player(&self) -> TrajectoryPlayer {
        TrajectoryPlayer::new(self.trajectory_steps, secs(self.trajectory_duration_secs))
            .with_writer(self.quiet_writer())
    }

    pub fn sequence_player(&self) -> SequencePlayer {
        SequencePlayer::new(self.trajectory_player(), self.replay_mode)
    }

    pub fn sequence_store(&self) -> SequenceStore {
        SequenceStore::new(&self.sequence_path)
    }
}
