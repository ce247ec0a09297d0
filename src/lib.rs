//! # stepper-velocity
//!
//! Velocity-mode stepper motor control for A4988-class step/direction driver
//! carriers, for host-side boards with general-purpose digital outputs.
//!
//! ## Features
//!
//! - **Background stepping loop**: one long-lived worker thread per
//!   controller, pausable and stoppable from any caller
//! - **Concurrent control**: speed, pause, and stop changes are taken under
//!   a per-controller lock and observed within one step interval
//! - **Configuration-driven**: pin table and motor parameters from TOML,
//!   with reference-hardware defaults
//! - **embedded-hal 1.0**: pins are claimed from an [`OutputPort`] and
//!   written through `OutputPin` handles
//! - **Safe shutdown**: stop, fault, and drop paths all leave the driver
//!   disabled with STEP inactive before pins are released
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_velocity::{load_config, Direction, MotionController};
//!
//! // Load pin table and motor parameters from TOML
//! let config = load_config("stepper.toml")?;
//!
//! // `port` is any OutputPort backend (rppal, gpio-cdev, simulator)
//! let mut motor = MotionController::new(port, config)?;
//!
//! motor.set_direction(Direction::Clockwise)?;
//! motor.start()?;
//! motor.set_speed(120)?; // picked up within one step
//! motor.stop();
//! motor.wait_until_stopped()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod port;

// Re-exports for ergonomic API
pub use config::{load_config, parse_config, validate_config};
pub use config::{ControllerConfig, PinAssignment, PinRole};
pub use error::{ConfigError, ControlError, Error, Result};
pub use motion::{step_interval, Direction, MicrostepResolution};
pub use motor::{MotionController, MotorState};
pub use port::{OutputPort, ENABLE_ACTIVE, ENABLE_DISABLED};
