//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::ControllerConfig;

/// Validate a controller configuration.
///
/// Checks:
/// - Step angle is finite and positive
/// - Initial rpm is positive
/// - No two pin roles share a physical pin
pub fn validate_config(config: &ControllerConfig) -> Result<()> {
    if !config.step_angle_degrees.is_finite() || config.step_angle_degrees <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidStepAngle(
            config.step_angle_degrees,
        )));
    }

    if config.rpm == 0 {
        return Err(Error::Config(ConfigError::InvalidRpm(config.rpm)));
    }

    config.pins.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PinAssignment;

    #[test]
    fn test_valid_default_config() {
        assert!(validate_config(&ControllerConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_step_angle() {
        for bad in [0.0, -1.8, f32::NAN, f32::INFINITY] {
            let config = ControllerConfig {
                step_angle_degrees: bad,
                ..ControllerConfig::default()
            };
            assert!(matches!(
                validate_config(&config),
                Err(Error::Config(ConfigError::InvalidStepAngle(_)))
            ));
        }
    }

    #[test]
    fn test_zero_rpm() {
        let config = ControllerConfig {
            rpm: 0,
            ..ControllerConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidRpm(0)))
        ));
    }

    #[test]
    fn test_duplicate_pins_surface_as_config_error() {
        let config = ControllerConfig {
            pins: PinAssignment {
                enable: 24, // collides with step
                ..PinAssignment::default()
            },
            ..ControllerConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::DuplicatePin { pin: 24, .. }))
        ));
    }
}
