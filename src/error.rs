//! Error types for stepper-velocity.
//!
//! Provides unified error handling across configuration and motion control.

use core::fmt;

use crate::config::PinRole;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-velocity operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motion control or hardware error
    Control(ControlError),
}

/// Configuration-related errors.
///
/// All of these are fatal to controller construction; a controller is never
/// created from an invalid configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Step angle must be finite and > 0 degrees
    InvalidStepAngle(f32),
    /// Initial speed must be > 0 rpm
    InvalidRpm(u32),
    /// Two pin roles resolve to the same physical pin
    DuplicatePin {
        /// First role assigned to the pin
        first: PinRole,
        /// Second role assigned to the same pin
        second: PinRole,
        /// The shared BCM pin number
        pin: u8,
    },
    /// Failed to parse TOML configuration
    ParseError(String),
    /// File I/O error
    IoError(String),
}

/// Motion control errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlError {
    /// Requested speed must be > 0 rpm
    InvalidRpm(u32),
    /// A stepping loop is already active on this controller
    AlreadyRunning,
    /// A stepping loop is active; single-step is unavailable
    Busy,
    /// The step interval for the current speed cannot be represented
    UnrepresentableInterval {
        /// Speed in effect when the interval computation failed
        rpm: u32,
    },
    /// The output port refused to hand out a pin
    PinClaim {
        /// The BCM pin number that could not be claimed
        pin: u8,
    },
    /// A write to an output pin failed
    PinWrite {
        /// Role of the pin whose write failed
        role: PinRole,
    },
    /// The controller's pins have been released by `shutdown()`
    Released,
    /// The stepping loop thread panicked
    WorkerPanicked,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Control(e) => write!(f, "Control error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidStepAngle(v) => {
                write!(f, "Invalid step angle: {}. Must be finite and > 0", v)
            }
            ConfigError::InvalidRpm(v) => write!(f, "Invalid speed: {} rpm. Must be > 0", v),
            ConfigError::DuplicatePin { first, second, pin } => {
                write!(f, "Roles {} and {} both assigned to pin {}", first, second, pin)
            }
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::InvalidRpm(v) => write!(f, "Invalid speed: {} rpm. Must be > 0", v),
            ControlError::AlreadyRunning => write!(f, "Stepping loop is already running"),
            ControlError::Busy => write!(f, "Stepping loop is running; stop it first"),
            ControlError::UnrepresentableInterval { rpm } => {
                write!(f, "Step interval at {} rpm is not representable", rpm)
            }
            ControlError::PinClaim { pin } => write!(f, "Failed to claim pin {}", pin),
            ControlError::PinWrite { role } => write!(f, "Write to {} pin failed", role),
            ControlError::Released => write!(f, "Controller pins have been released"),
            ControlError::WorkerPanicked => write!(f, "Stepping loop thread panicked"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<ControlError> for Error {
    fn from(e: ControlError) -> Self {
        Error::Control(e)
    }
}

impl std::error::Error for Error {}

impl std::error::Error for ConfigError {}

impl std::error::Error for ControlError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_offending_value() {
        let e = Error::Config(ConfigError::InvalidStepAngle(-1.8));
        assert!(e.to_string().contains("-1.8"));

        let e = Error::Control(ControlError::InvalidRpm(0));
        assert!(e.to_string().contains("0 rpm"));
    }

    #[test]
    fn test_from_conversions() {
        let e: Error = ConfigError::InvalidRpm(0).into();
        assert!(matches!(e, Error::Config(ConfigError::InvalidRpm(0))));

        let e: Error = ControlError::AlreadyRunning.into();
        assert!(matches!(e, Error::Control(ControlError::AlreadyRunning)));
    }
}
