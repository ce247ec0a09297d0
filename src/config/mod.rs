//! Configuration module for stepper-velocity.
//!
//! Provides types for loading and validating the pin assignment table and
//! motor parameters from TOML files or pre-parsed data.

mod loader;
mod motor;
mod pins;
mod validation;

pub use loader::{load_config, parse_config};
pub use motor::ControllerConfig;
pub use pins::{PinAssignment, PinRole};
pub use validation::validate_config;
