//! Motion primitives: direction, microstep resolution, and step timing.

use core::time::Duration;

use embedded_hal::digital::PinState;
use serde::Deserialize;

/// Direction of motor rotation.
///
/// The DIR pin polarity is a fixed constant of the reference wiring:
/// clockwise drives the pin high, counter-clockwise drives it low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Clockwise rotation (DIR pin high).
    Clockwise,
    /// Counter-clockwise rotation (DIR pin low).
    CounterClockwise,
}

impl Direction {
    /// Level written to the DIR pin for this direction.
    #[inline]
    pub fn pin_state(self) -> PinState {
        match self {
            Direction::Clockwise => PinState::High,
            Direction::CounterClockwise => PinState::Low,
        }
    }
}

/// Microstep resolution selected via the driver's MS1..MS3 pins.
///
/// The pattern table is the A4988 truth table; each variant maps to a
/// distinct 3-bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MicrostepResolution {
    /// Full steps (MS1..MS3 = low, low, low).
    #[default]
    Full,
    /// Half steps (high, low, low).
    Half,
    /// Quarter steps (low, high, low).
    Quarter,
    /// Eighth steps (high, high, low).
    Eighth,
    /// Sixteenth steps (high, high, high).
    Sixteenth,
}

impl MicrostepResolution {
    /// All five resolutions.
    pub const ALL: [MicrostepResolution; 5] = [
        MicrostepResolution::Full,
        MicrostepResolution::Half,
        MicrostepResolution::Quarter,
        MicrostepResolution::Eighth,
        MicrostepResolution::Sixteenth,
    ];

    /// Levels written to MS1, MS2, MS3 for this resolution.
    pub fn select_pattern(self) -> [PinState; 3] {
        use PinState::{High, Low};
        match self {
            MicrostepResolution::Full => [Low, Low, Low],
            MicrostepResolution::Half => [High, Low, Low],
            MicrostepResolution::Quarter => [Low, High, Low],
            MicrostepResolution::Eighth => [High, High, Low],
            MicrostepResolution::Sixteenth => [High, High, High],
        }
    }

    /// Microsteps per full mechanical step.
    #[inline]
    pub fn divisor(self) -> u16 {
        match self {
            MicrostepResolution::Full => 1,
            MicrostepResolution::Half => 2,
            MicrostepResolution::Quarter => 4,
            MicrostepResolution::Eighth => 8,
            MicrostepResolution::Sixteenth => 16,
        }
    }
}

/// Time between step pulses for a target speed.
///
/// `interval = 60 / (rpm * steps_per_revolution)` seconds. Returns `None`
/// when the interval is not representable (zero rpm, zero steps, or a
/// duration that rounds to zero).
pub fn step_interval(rpm: u32, steps_per_revolution: u32) -> Option<Duration> {
    let steps_per_second = f64::from(rpm) / 60.0 * f64::from(steps_per_revolution);
    if steps_per_second <= 0.0 {
        return None;
    }

    let interval = Duration::try_from_secs_f64(1.0 / steps_per_second).ok()?;
    if interval.is_zero() {
        return None;
    }
    Some(interval)
}
