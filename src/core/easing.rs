//! Smoothstep easing for time-remapped motion.

/// Map normalized time `t` in `[0, 1]` to eased progress in `[0, 1]`.
///
/// Uses the smoothstep polynomial `3t² − 2t³`: zero velocity at both ends,
/// symmetric around the midpoint. Callers clamp `t`; values outside the
/// unit interval are not meaningful.
///
/// # Example
///
/// ```rust
/// use poseplay::core::ease;
///
/// assert_eq!(ease(0.0), 0.0);
/// assert_eq!(ease(0.5), 0.5);
/// assert_eq!(ease(1.0), 1.0);
/// ```
pub fn ease(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}
