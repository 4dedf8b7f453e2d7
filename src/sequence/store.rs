//! Durable storage for recorded sequences.

use super::error::{LoadError, SaveError};
use super::validation::check_sequence;
use super::Sequence;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where sequences are saved when nothing else is configured.
pub const DEFAULT_SEQUENCE_PATH: &str = "sequence.json";

/// On-disk encoding of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceFormat {
    /// Human-readable array of `{"angles": [..], "duration": ..}` records
    Json,
    /// Compact bincode encoding
    Binary,
}

impl SequenceFormat {
    /// Pick a format from the file extension: `.bin` is binary, anything
    /// else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bin") => Self::Binary,
            _ => Self::Json,
        }
    }

    pub fn encode(self, sequence: &Sequence) -> Result<Vec<u8>, SaveError> {
        match self {
            Self::Json => serde_json::to_vec_pretty(sequence)
                .map_err(|e| SaveError::SerializationFailed(e.to_string())),
            Self::Binary => bincode::serialize(sequence)
                .map_err(|e| SaveError::SerializationFailed(e.to_string())),
        }
    }

    /// Decode bytes; the error string describes why the content is malformed.
    pub fn decode(self, bytes: &[u8]) -> Result<Sequence, String> {
        match self {
            Self::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
            Self::Binary => bincode::deserialize(bytes).map_err(|e| e.to_string()),
        }
    }
}

/// A sequence file at a fixed location.
///
/// Saves replace the previous file completely: content goes to a sibling
/// temporary file that is then renamed over the destination, so a failed
/// save never leaves a half-written sequence behind.
///
/// # Example
///
/// ```rust,no_run
/// use poseplay::sequence::{Pose, Sequence, SequenceStore};
///
/// let store = SequenceStore::new("sequence.json");
/// let sequence = Sequence::from_poses(vec![Pose::new([90.0; 4], 0.5)]);
///
/// store.save(&sequence)?;
/// assert_eq!(store.load()?, sequence);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceStore {
    path: PathBuf,
    format: SequenceFormat,
}

impl SequenceStore {
    /// Store at `path`, with the format chosen from its extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = SequenceFormat::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SequenceFormat {
        self.format
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write `sequence`, fully replacing whatever was stored before.
    pub fn save(&self, sequence: &Sequence) -> Result<(), SaveError> {
        let bytes = self.format.encode(sequence)?;
        let temp = self.temp_path();

        let io_err = |source| SaveError::Io {
            path: self.path.clone(),
            source,
        };

        fs::write(&temp, bytes).map_err(io_err)?;
        if let Err(source) = fs::rename(&temp, &self.path) {
            fs::remove_file(&temp).ok();
            return Err(io_err(source));
        }

        info!(path = %self.path.display(), poses = sequence.len(), "sequence saved");
        Ok(())
    }

    /// Read, decode and validate the stored sequence.
    pub fn load(&self) -> Result<Sequence, LoadError> {
        let bytes = fs::read(&self.path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => LoadError::Missing {
                path: self.path.clone(),
            },
            _ => LoadError::Io {
                path: self.path.clone(),
                source,
            },
        })?;

        let sequence = self
            .format
            .decode(&bytes)
            .map_err(|reason| LoadError::Malformed {
                path: self.path.clone(),
                reason,
            })?;

        check_sequence(&sequence).map_err(|violations| LoadError::Invalid {
            path: self.path.clone(),
            violations,
        })?;

        info!(path = %self.path.display(), poses = sequence.len(), "sequence loaded");
        Ok(sequence)
    }

    /// Load, substituting an empty sequence on any failure.
    ///
    /// The error is logged and returned alongside so the operator can be
    /// told; it never propagates further.
    pub fn load_or_empty(&self) -> (Sequence, Option<LoadError>) {
        match self.load() {
            Ok(sequence) => (sequence, None),
            Err(err) => {
                warn!(error = %err, "falling back to empty sequence");
                (Sequence::new(), Some(err))
            }
        }
    }
}
