//! Shared test support: a recording GPIO port.
//!
//! `RecordingPort` hands out pins that log every level write into a shared
//! recorder, so tests can observe pulse counts and final pin levels. A
//! single pin can be made to fail its writes to exercise fault paths.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use embedded_hal::digital::{Error as DigitalError, ErrorKind, ErrorType, OutputPin};
use stepper_velocity::OutputPort;

#[derive(Debug, Default)]
struct Inner {
    /// Last written level per pin (true = high).
    levels: HashMap<u8, bool>,
    /// Every write, in order.
    writes: Vec<(u8, bool)>,
    /// Currently claimed pins.
    claimed: HashSet<u8>,
    /// Pin whose writes fail, if any.
    failing: Option<u8>,
}

/// Shared view of all pin activity on a [`RecordingPort`].
#[derive(Clone, Default)]
pub struct PinRecorder(Arc<Mutex<Inner>>);

impl PinRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last level written to a pin (true = high).
    pub fn level(&self, pin: u8) -> Option<bool> {
        self.0.lock().unwrap().levels.get(&pin).copied()
    }

    /// Number of high writes to a pin (= pulses on the STEP pin).
    pub fn high_writes(&self, pin: u8) -> usize {
        self.0
            .lock()
            .unwrap()
            .writes
            .iter()
            .filter(|&&(p, level)| p == pin && level)
            .count()
    }

    /// Number of pins currently claimed from the port.
    pub fn claimed_count(&self) -> usize {
        self.0.lock().unwrap().claimed.len()
    }

    /// Make every write to `pin` fail from now on.
    pub fn fail_pin(&self, pin: u8) {
        self.0.lock().unwrap().failing = Some(pin);
    }
}

/// Write error injected by [`PinRecorder::fail_pin`].
#[derive(Debug)]
pub struct InjectedFault;

impl DigitalError for InjectedFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A claimed recording pin.
pub struct RecordingPin {
    pin: u8,
    recorder: PinRecorder,
}

impl RecordingPin {
    fn write(&mut self, level: bool) -> Result<(), InjectedFault> {
        let mut inner = self.recorder.0.lock().unwrap();
        if inner.failing == Some(self.pin) {
            return Err(InjectedFault);
        }
        inner.levels.insert(self.pin, level);
        inner.writes.push((self.pin, level));
        Ok(())
    }
}

impl ErrorType for RecordingPin {
    type Error = InjectedFault;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), InjectedFault> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), InjectedFault> {
        self.write(true)
    }
}

/// An [`OutputPort`] whose pins record into a shared [`PinRecorder`].
pub struct RecordingPort {
    recorder: PinRecorder,
}

impl RecordingPort {
    pub fn new(recorder: PinRecorder) -> Self {
        Self { recorder }
    }
}

impl OutputPort for RecordingPort {
    type Output = RecordingPin;
    type Error = core::convert::Infallible;

    fn configure(&mut self, pin: u8) -> Result<RecordingPin, Self::Error> {
        self.recorder.0.lock().unwrap().claimed.insert(pin);
        Ok(RecordingPin {
            pin,
            recorder: self.recorder.clone(),
        })
    }

    fn release(&mut self, pin: u8, _output: RecordingPin) {
        self.recorder.0.lock().unwrap().claimed.remove(&pin);
    }
}
