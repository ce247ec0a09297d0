//! Digital output port abstraction.
//!
//! The controller never touches hardware directly: it claims output pins
//! from an [`OutputPort`] and writes them through embedded-hal 1.0
//! [`OutputPin`] handles. Backends wrap whatever GPIO access the platform
//! offers (rppal, gpio-cdev, a simulator); tests supply recording pins.

mod bank;

pub(crate) use bank::PinBank;

use embedded_hal::digital::{OutputPin, PinState};

/// Level at which the ENABLE pin energizes the windings.
///
/// A4988-class carriers have an active-low enable input.
pub const ENABLE_ACTIVE: PinState = PinState::Low;

/// Level at which the ENABLE pin de-energizes the windings.
pub const ENABLE_DISABLED: PinState = PinState::High;

/// A claimable bank of digital output pins, addressed by pin number.
///
/// `configure` hands out an exclusively-owned output handle for a pin;
/// `release` returns it. Both are infallible-by-number on well-behaved
/// backends; a claim failure (pin busy, no GPIO chip) surfaces through
/// `Self::Error`.
pub trait OutputPort {
    /// Output handle type for a claimed pin.
    type Output: OutputPin;

    /// Backend error for failed claims.
    type Error: core::fmt::Debug;

    /// Claim a pin as a digital output.
    fn configure(&mut self, pin: u8) -> Result<Self::Output, Self::Error>;

    /// Return a previously claimed pin to the port.
    fn release(&mut self, pin: u8, output: Self::Output);
}
