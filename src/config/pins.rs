//! Pin roles and the pin assignment table.
//!
//! Maps logical driver-chip pin roles to BCM pin numbers. The defaults match
//! the reference wiring of an A4988 carrier on a Raspberry Pi header.

use core::fmt;

use serde::Deserialize;

use crate::error::ConfigError;

/// Logical role of a controlled output pin on the driver carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinRole {
    /// DIR pin (rotation sense).
    Direction,
    /// STEP pin (one pulse advances one microstep).
    Step,
    /// ENABLE pin (active-low on A4988 carriers).
    Enable,
    /// VDD logic supply pin.
    Power,
    /// MS1 microstep select pin.
    MicrostepSelect1,
    /// MS2 microstep select pin.
    MicrostepSelect2,
    /// MS3 microstep select pin.
    MicrostepSelect3,
}

impl PinRole {
    /// All seven roles, in claim order.
    pub const ALL: [PinRole; 7] = [
        PinRole::Direction,
        PinRole::Step,
        PinRole::Enable,
        PinRole::Power,
        PinRole::MicrostepSelect1,
        PinRole::MicrostepSelect2,
        PinRole::MicrostepSelect3,
    ];
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PinRole::Direction => "DIR",
            PinRole::Step => "STEP",
            PinRole::Enable => "ENABLE",
            PinRole::Power => "VDD",
            PinRole::MicrostepSelect1 => "MS1",
            PinRole::MicrostepSelect2 => "MS2",
            PinRole::MicrostepSelect3 => "MS3",
        };
        f.write_str(name)
    }
}

/// Assignment of every pin role to a BCM pin number.
///
/// Each field can be overridden individually in TOML; unset fields keep the
/// reference-hardware defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PinAssignment {
    /// DIR pin number.
    #[serde(default = "default_direction")]
    pub direction: u8,

    /// STEP pin number.
    #[serde(default = "default_step")]
    pub step: u8,

    /// ENABLE pin number.
    #[serde(default = "default_enable")]
    pub enable: u8,

    /// VDD pin number.
    #[serde(default = "default_power")]
    pub power: u8,

    /// MS1 pin number.
    #[serde(default = "default_ms1")]
    pub ms1: u8,

    /// MS2 pin number.
    #[serde(default = "default_ms2")]
    pub ms2: u8,

    /// MS3 pin number.
    #[serde(default = "default_ms3")]
    pub ms3: u8,
}

fn default_direction() -> u8 {
    23
}

fn default_step() -> u8 {
    24
}

fn default_enable() -> u8 {
    12
}

fn default_power() -> u8 {
    14
}

fn default_ms1() -> u8 {
    22
}

fn default_ms2() -> u8 {
    5
}

fn default_ms3() -> u8 {
    6
}

impl Default for PinAssignment {
    fn default() -> Self {
        Self {
            direction: default_direction(),
            step: default_step(),
            enable: default_enable(),
            power: default_power(),
            ms1: default_ms1(),
            ms2: default_ms2(),
            ms3: default_ms3(),
        }
    }
}

impl PinAssignment {
    /// Get the pin number assigned to a role.
    #[inline]
    pub fn pin(&self, role: PinRole) -> u8 {
        match role {
            PinRole::Direction => self.direction,
            PinRole::Step => self.step,
            PinRole::Enable => self.enable,
            PinRole::Power => self.power,
            PinRole::MicrostepSelect1 => self.ms1,
            PinRole::MicrostepSelect2 => self.ms2,
            PinRole::MicrostepSelect3 => self.ms3,
        }
    }

    /// Iterate over all (role, pin) entries in claim order.
    pub fn entries(&self) -> impl Iterator<Item = (PinRole, u8)> + '_ {
        PinRole::ALL.iter().map(move |&role| (role, self.pin(role)))
    }

    /// Check that no two roles share a pin.
    ///
    /// Shared lines between controllers are a wiring choice, but within one
    /// assignment every role must have its own pin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, (first, pin)) in self.entries().enumerate() {
            for (second, other) in self.entries().skip(i + 1) {
                if pin == other {
                    return Err(ConfigError::DuplicatePin { first, second, pin });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_matches_reference_wiring() {
        let pins = PinAssignment::default();
        assert_eq!(pins.pin(PinRole::Direction), 23);
        assert_eq!(pins.pin(PinRole::Step), 24);
        assert_eq!(pins.pin(PinRole::Enable), 12);
        assert_eq!(pins.pin(PinRole::Power), 14);
        assert_eq!(pins.pin(PinRole::MicrostepSelect1), 22);
        assert_eq!(pins.pin(PinRole::MicrostepSelect2), 5);
        assert_eq!(pins.pin(PinRole::MicrostepSelect3), 6);
    }

    #[test]
    fn test_default_table_is_valid() {
        assert!(PinAssignment::default().validate().is_ok());
    }

    #[test]
    fn test_duplicate_pin_rejected() {
        let pins = PinAssignment {
            step: 23, // collides with direction
            ..PinAssignment::default()
        };

        let result = pins.validate();
        assert!(matches!(
            result,
            Err(ConfigError::DuplicatePin {
                first: PinRole::Direction,
                second: PinRole::Step,
                pin: 23,
            })
        ));
    }

    #[test]
    fn test_partial_toml_override_keeps_defaults() {
        let pins: PinAssignment = toml::from_str("step = 16\nms2 = 20").unwrap();
        assert_eq!(pins.step, 16);
        assert_eq!(pins.ms2, 20);
        assert_eq!(pins.direction, 23);
        assert_eq!(pins.enable, 12);
    }
}
