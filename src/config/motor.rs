//! Controller configuration from TOML.

use serde::Deserialize;

use crate::motion::MicrostepResolution;

use super::pins::PinAssignment;

/// Complete controller configuration.
///
/// Every field has a default, so an empty TOML document (or
/// `ControllerConfig::default()`) yields a working configuration for the
/// reference wiring: a 1.8-degree motor at 60 rpm, full steps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Degrees of rotation per full mechanical step (1.8 for 200-step motors).
    pub step_angle_degrees: f32,

    /// Initial target speed in revolutions per minute.
    pub rpm: u32,

    /// Initial microstep resolution.
    pub resolution: MicrostepResolution,

    /// Pin role assignments.
    pub pins: PinAssignment,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            step_angle_degrees: 1.8,
            rpm: 60,
            resolution: MicrostepResolution::Full,
            pins: PinAssignment::default(),
        }
    }
}

impl ControllerConfig {
    /// Full mechanical steps per shaft revolution, rounded from the step angle.
    pub fn steps_per_revolution(&self) -> u32 {
        (360.0 / self.step_angle_degrees).round() as u32
    }
}
