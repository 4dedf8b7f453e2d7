//! Suspension between trajectory steps.

use std::time::Duration;

/// Blocks the flow of control between motion steps.
///
/// Motion is cooperative and single-threaded: every wait goes through this
/// trait so the caller decides whether a wait is a real sleep, a simulated
/// one, or an interruptible poll.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

impl<S: Sleeper + ?Sized> Sleeper for &mut S {
    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Blocking thread sleep.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Sleeper that advances a virtual clock instead of blocking.
///
/// Useful for dry runs and for asserting how long a motion would take.
///
/// # Example
///
/// ```rust
/// use poseplay::motion::{Sleeper, VirtualClock};
/// use std::time::Duration;
///
/// let mut clock = VirtualClock::new();
/// clock.sleep(Duration::from_millis(20));
/// clock.sleep(Duration::from_millis(30));
///
/// assert_eq!(clock.elapsed(), Duration::from_millis(50));
/// assert_eq!(clock.naps(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VirtualClock {
    elapsed: Duration,
    naps: usize,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time that would have been spent sleeping.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of sleep calls.
    pub fn naps(&self) -> usize {
        self.naps
    }
}

impl Sleeper for VirtualClock {
    fn sleep(&mut self, duration: Duration) {
        self.elapsed += duration;
        self.naps += 1;
    }
}

/// Convert a seconds value from config or a pose into a `Duration`.
///
/// Negative or non-finite values collapse to zero rather than panicking.
pub fn secs(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
}
