//! Angle to pulse-width mapping for hobby servos on a 16-bit PWM channel.

use crate::core::{clamp_angle, MAX_ANGLE};
use serde::{Deserialize, Serialize};

/// Full scale of a 16-bit duty-cycle register.
pub const DUTY_CYCLE_MAX: u16 = u16::MAX;

/// Pulse range and PWM frequency of one servo channel.
///
/// Defaults match a standard 180° servo driven at 60 Hz with a 500–2500 µs
/// pulse window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServoCalibration {
    /// Pulse width at 0°, in microseconds.
    pub min_pulse_us: u32,
    /// Pulse width at full actuation range, in microseconds.
    pub max_pulse_us: u32,
    /// PWM refresh frequency in hertz.
    pub frequency_hz: u32,
    /// Angle covered by the pulse window, in degrees.
    pub actuation_range_deg: f64,
}

impl Default for ServoCalibration {
    fn default() -> Self {
        Self {
            min_pulse_us: 500,
            max_pulse_us: 2500,
            frequency_hz: 60,
            actuation_range_deg: MAX_ANGLE,
        }
    }
}

impl ServoCalibration {
    /// Length of one PWM period in microseconds.
    pub fn period_us(&self) -> f64 {
        1_000_000.0 / f64::from(self.frequency_hz)
    }

    /// Pulse width that holds the servo at `angle`.
    pub fn pulse_width_us(&self, angle: f64) -> f64 {
        let fraction = clamp_angle(angle).min(self.actuation_range_deg) / self.actuation_range_deg;
        let span = f64::from(self.max_pulse_us) - f64::from(self.min_pulse_us);
        f64::from(self.min_pulse_us) + span * fraction
    }

    /// 16-bit duty cycle for `angle` at the configured frequency.
    pub fn duty_cycle(&self, angle: f64) -> u16 {
        let ratio = self.pulse_width_us(angle) / self.period_us();
        (ratio * f64::from(DUTY_CYCLE_MAX)).round() as u16
    }
}
