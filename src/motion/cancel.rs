//! Cooperative cancellation of in-flight motion.

use super::error::MotionError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag checked between motion steps.
///
/// Clones share the same flag, so a watcher (a key poller, a signal handler,
/// another thread) can stop a trajectory or replay at the next step
/// boundary.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that running motion stop at the next step.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clear a previous cancellation before starting new motion.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// `Err(MotionError::Cancelled)` once cancellation was requested.
    pub fn check(&self) -> Result<(), MotionError> {
        if self.is_cancelled() {
            Err(MotionError::Cancelled)
        } else {
            Ok(())
        }
    }
}
