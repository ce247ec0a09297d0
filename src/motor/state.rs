//! Mutable motor state shared between the controller and the stepping loop.

use crate::config::ControllerConfig;
use crate::motion::{Direction, MicrostepResolution};

/// The mutable record behind the controller's state lock.
///
/// Every read or write of any field happens while holding the controller's
/// per-instance lock. `stop_requested` is terminal for a running loop: the
/// loop exits on observing it and never clears it; only an explicit
/// [`start`](crate::motor::MotionController::start) re-arms the flags.
/// When `paused` and `stop_requested` are both set, stop wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorState {
    /// Current rotation direction.
    pub direction: Direction,
    /// Current microstep resolution.
    pub resolution: MicrostepResolution,
    /// Whether the driver is energized (ENABLE at its active level).
    pub enabled: bool,
    /// Target speed in revolutions per minute.
    pub rpm: u32,
    /// Pulse emission suspended.
    pub paused: bool,
    /// Loop shutdown requested.
    pub stop_requested: bool,
}

impl MotorState {
    /// Initial state for a freshly constructed controller.
    ///
    /// Direction starts counter-clockwise because construction drives the
    /// DIR pin low; the driver starts disabled.
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            direction: Direction::CounterClockwise,
            resolution: config.resolution,
            enabled: false,
            rpm: config.rpm,
            paused: false,
            stop_requested: false,
        }
    }
}
