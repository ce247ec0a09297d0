//! Claimed output pins, one per driver role.

use embedded_hal::digital::{OutputPin, PinState};

use crate::config::{PinAssignment, PinRole};
use crate::error::ControlError;

use super::{OutputPort, ENABLE_DISABLED};

/// The set of claimed outputs for one controller.
///
/// Pins are `Some` from claim until [`PinBank::release_all`]; any write after
/// release fails with [`ControlError::Released`].
pub(crate) struct PinBank<O: OutputPin> {
    assignment: PinAssignment,
    direction: Option<O>,
    step: Option<O>,
    enable: Option<O>,
    power: Option<O>,
    ms1: Option<O>,
    ms2: Option<O>,
    ms3: Option<O>,
}

impl<O: OutputPin> PinBank<O> {
    /// Claim every assigned pin from the port.
    ///
    /// On a claim failure, pins claimed so far are released before returning.
    pub(crate) fn claim<P>(port: &mut P, assignment: &PinAssignment) -> Result<Self, ControlError>
    where
        P: OutputPort<Output = O>,
    {
        let mut bank = Self {
            assignment: *assignment,
            direction: None,
            step: None,
            enable: None,
            power: None,
            ms1: None,
            ms2: None,
            ms3: None,
        };

        for (role, pin) in assignment.entries() {
            match port.configure(pin) {
                Ok(output) => {
                    log::debug!("claimed pin {} as {}", pin, role);
                    *bank.slot(role) = Some(output);
                }
                Err(e) => {
                    log::error!("failed to claim pin {} as {}: {:?}", pin, role, e);
                    bank.release_all(port);
                    return Err(ControlError::PinClaim { pin });
                }
            }
        }

        Ok(bank)
    }

    fn slot(&mut self, role: PinRole) -> &mut Option<O> {
        match role {
            PinRole::Direction => &mut self.direction,
            PinRole::Step => &mut self.step,
            PinRole::Enable => &mut self.enable,
            PinRole::Power => &mut self.power,
            PinRole::MicrostepSelect1 => &mut self.ms1,
            PinRole::MicrostepSelect2 => &mut self.ms2,
            PinRole::MicrostepSelect3 => &mut self.ms3,
        }
    }

    /// Write a level to the pin holding a role.
    pub(crate) fn write(&mut self, role: PinRole, state: PinState) -> Result<(), ControlError> {
        let output = self.slot(role).as_mut().ok_or(ControlError::Released)?;
        output
            .set_state(state)
            .map_err(|_| ControlError::PinWrite { role })
    }

    /// Emit one step pulse: STEP high then low, adjacent writes.
    pub(crate) fn pulse_step(&mut self) -> Result<(), ControlError> {
        self.write(PinRole::Step, PinState::High)?;
        self.write(PinRole::Step, PinState::Low)
    }

    /// Write the MS1..MS3 pattern for a microstep resolution.
    pub(crate) fn write_select_pattern(
        &mut self,
        pattern: [PinState; 3],
    ) -> Result<(), ControlError> {
        self.write(PinRole::MicrostepSelect1, pattern[0])?;
        self.write(PinRole::MicrostepSelect2, pattern[1])?;
        self.write(PinRole::MicrostepSelect3, pattern[2])
    }

    /// Drive every pin low, ENABLE included.
    ///
    /// This is the construction-time sweep; ENABLE low means the driver is
    /// momentarily energized, so callers follow up with a disable write.
    pub(crate) fn drive_all_low(&mut self) -> Result<(), ControlError> {
        for role in PinRole::ALL {
            self.write(role, PinState::Low)?;
        }
        Ok(())
    }

    /// Shutdown sweep: every non-enable pin low, then ENABLE to its disabled
    /// level, so the motor ends de-energized with STEP inactive.
    ///
    /// Best effort: all writes are attempted; the first error is returned.
    pub(crate) fn shutdown_sweep(&mut self) -> Result<(), ControlError> {
        let mut first_error = None;
        for role in PinRole::ALL {
            if role == PinRole::Enable {
                continue;
            }
            if let Err(e) = self.write(role, PinState::Low) {
                first_error.get_or_insert(e);
            }
        }
        if let Err(e) = self.write(PinRole::Enable, ENABLE_DISABLED) {
            first_error.get_or_insert(e);
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Return every claimed pin to the port. Idempotent.
    pub(crate) fn release_all<P>(&mut self, port: &mut P)
    where
        P: OutputPort<Output = O>,
    {
        let assignment = self.assignment;
        for (role, pin) in assignment.entries() {
            if let Some(output) = self.slot(role).take() {
                log::debug!("released pin {} ({})", pin, role);
                port.release(pin, output);
            }
        }
    }
}
