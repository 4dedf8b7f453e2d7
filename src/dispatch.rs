//! Single-key operator commands.
//!
//! Each recognised key maps to exactly one controller operation; anything
//! else is ignored. Every outcome, including failures, is reported back as
//! an [`Outcome`] so the input loop always keeps running.

use crate::actuator::Actuator;
use crate::controller::ArmController;
use crate::core::{Joint, JointAngles};
use crate::motion::{MotionError, Sleeper};
use crate::sequence::{LoadError, SaveError};
use std::fmt;
use std::path::PathBuf;

/// Key bindings shown to the operator.
pub const HELP: &str = "\
Control the robot arm:
  q/a - base        (left/right)
  w/s - shoulder    (up/down)
  e/d - elbow       (up/down)
  r/f - gripper     (open/close)

  SPACE - record pose
  z     - save sequence
  x     - load and replay sequence
  ESC   - stop current motion
  Ctrl-C - quit";

/// Which way a jog moves a joint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Self::Increase => 1.0,
            Self::Decrease => -1.0,
        }
    }
}

/// One operator request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Jog { joint: Joint, direction: Direction },
    Record,
    Save,
    LoadAndReplay,
}

impl Command {
    /// Map a key to its command; unbound keys return `None`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use poseplay::core::Joint;
    /// use poseplay::dispatch::{Command, Direction};
    ///
    /// assert_eq!(
    ///     Command::from_key('w'),
    ///     Some(Command::Jog { joint: Joint::Shoulder, direction: Direction::Increase })
    /// );
    /// assert_eq!(Command::from_key(' '), Some(Command::Record));
    /// assert_eq!(Command::from_key('?'), None);
    /// ```
    pub fn from_key(key: char) -> Option<Self> {
        use Direction::{Decrease, Increase};

        let jog = |joint, direction| Some(Self::Jog { joint, direction });
        match key {
            'q' => jog(Joint::Base, Increase),
            'a' => jog(Joint::Base, Decrease),
            'w' => jog(Joint::Shoulder, Increase),
            's' => jog(Joint::Shoulder, Decrease),
            'e' => jog(Joint::Elbow, Increase),
            'd' => jog(Joint::Elbow, Decrease),
            'r' => jog(Joint::Gripper, Increase),
            'f' => jog(Joint::Gripper, Decrease),
            ' ' => Some(Self::Record),
            'z' => Some(Self::Save),
            'x' => Some(Self::LoadAndReplay),
            _ => None,
        }
    }
}

/// What happened in response to a command.
#[derive(Debug)]
pub enum Outcome {
    Moved {
        joint: Joint,
        angle: f64,
    },
    Recorded {
        index: usize,
        angles: JointAngles,
    },
    Saved {
        path: PathBuf,
        poses: usize,
    },
    SaveFailed(SaveError),
    Replayed {
        poses: usize,
        load_error: Option<LoadError>,
    },
    /// Motion stopped early; the arm holds wherever it got to
    Interrupted {
        error: MotionError,
        load_error: Option<LoadError>,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved { joint, angle } => write!(f, "{joint} -> {angle:.1}°"),
            Self::Recorded { index, angles } => {
                write!(f, "Recorded pose #{index}: {angles:?}")
            }
            Self::Saved { path, poses } => {
                write!(f, "Saved {poses} pose(s) to {}", path.display())
            }
            Self::SaveFailed(err) => write!(f, "Save failed: {err}"),
            Self::Replayed { poses, load_error } => {
                if let Some(err) = load_error {
                    write!(f, "Load failed ({err}); replayed nothing")
                } else {
                    write!(f, "Replayed {poses} pose(s)")
                }
            }
            Self::Interrupted { error, .. } => write!(f, "Motion stopped: {error}"),
        }
    }
}

/// Run one command against the controller.
pub fn dispatch<A: Actuator, S: Sleeper>(
    controller: &mut ArmController<A, S>,
    command: Command,
) -> Outcome {
    match command {
        Command::Jog { joint, direction } => match controller.jog(joint, direction.sign()) {
            Ok(angle) => Outcome::Moved { joint, angle },
            Err(error) => Outcome::Interrupted {
                error,
                load_error: None,
            },
        },
        Command::Record => {
            let pose = controller.record_step();
            Outcome::Recorded {
                index: controller.sequence().len() - 1,
                angles: pose.angles,
            }
        }
        Command::Save => match controller.save() {
            Ok(()) => Outcome::Saved {
                path: controller.store().path().to_path_buf(),
                poses: controller.sequence().len(),
            },
            Err(err) => Outcome::SaveFailed(err),
        },
        Command::LoadAndReplay => {
            let playback = controller.load_and_replay();
            match playback.result {
                Ok(poses) => Outcome::Replayed {
                    poses,
                    load_error: playback.load_error,
                },
                Err(error) => Outcome::Interrupted {
                    error,
                    load_error: playback.load_error,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::SimulatedActuator;
    use crate::config::ArmConfig;
    use crate::motion::VirtualClock;
    use tempfile::tempdir;

    fn controller(dir: &std::path::Path) -> ArmController<SimulatedActuator, VirtualClock> {
        ArmController::builder()
            .actuator(SimulatedActuator::new())
            .sleeper(VirtualClock::new())
            .config(ArmConfig {
                sequence_path: dir.join("sequence.json"),
                ..ArmConfig::default()
            })
            .build()
            .unwrap()
    }

    #[test]
    fn eight_jog_keys_cover_every_joint_both_ways() {
        let jogs: Vec<Command> = "qawsedrf".chars().filter_map(Command::from_key).collect();
        assert_eq!(jogs.len(), 8);

        for joint in Joint::ALL {
            for direction in [Direction::Increase, Direction::Decrease] {
                assert!(jogs.contains(&Command::Jog { joint, direction }));
            }
        }
    }

    #[test]
    fn unbound_keys_are_ignored() {
        for key in ['Q', 'x'.to_ascii_uppercase(), '1', '\n', 'g', '\u{1b}'] {
            assert_eq!(Command::from_key(key), None, "key {key:?}");
        }
    }

    #[test]
    fn jog_reports_new_angle() {
        let dir = tempdir().unwrap();
        let mut controller = controller(dir.path());

        let outcome = dispatch(&mut controller, Command::from_key('d').unwrap());
        match outcome {
            Outcome::Moved { joint, angle } => {
                assert_eq!(joint, Joint::Elbow);
                assert_eq!(angle, 85.0);
            }
            other => panic!("Expected Moved, got {other:?}"),
        }
    }

    #[test]
    fn record_then_save_reports_pose_count() {
        let dir = tempdir().unwrap();
        let mut controller = controller(dir.path());

        dispatch(&mut controller, Command::Record);
        let outcome = dispatch(&mut controller, Command::Record);
        assert!(matches!(outcome, Outcome::Recorded { index: 1, .. }));

        match dispatch(&mut controller, Command::Save) {
            Outcome::Saved { poses, path } => {
                assert_eq!(poses, 2);
                assert!(path.exists());
            }
            other => panic!("Expected Saved, got {other:?}"),
        }
    }

    #[test]
    fn replay_without_a_file_fails_soft() {
        let dir = tempdir().unwrap();
        let mut controller = controller(dir.path());

        let outcome = dispatch(&mut controller, Command::LoadAndReplay);
        match &outcome {
            Outcome::Replayed { poses, load_error } => {
                assert_eq!(*poses, 0);
                assert!(matches!(load_error, Some(LoadError::Missing { .. })));
            }
            other => panic!("Expected Replayed, got {other:?}"),
        }
        assert!(outcome.to_string().starts_with("Load failed"));
    }

    #[test]
    fn save_failure_is_an_outcome_not_a_panic() {
        let dir = tempdir().unwrap();
        let mut controller = ArmController::builder()
            .actuator(SimulatedActuator::new())
            .sleeper(VirtualClock::new())
            .config(ArmConfig {
                sequence_path: dir.path().join("no").join("such").join("dir.json"),
                ..ArmConfig::default()
            })
            .build()
            .unwrap();

        let outcome = dispatch(&mut controller, Command::Save);
        assert!(matches!(outcome, Outcome::SaveFailed(SaveError::Io { .. })));
    }

    #[test]
    fn help_lists_every_binding() {
        for key in ["q/a", "w/s", "e/d", "r/f", "SPACE", "z ", "x "] {
            assert!(HELP.contains(key), "missing {key}");
        }
    }
}
