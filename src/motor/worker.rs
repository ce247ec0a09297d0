//! The stepping loop.
//!
//! One worker thread per controller, spawned by `start()`. Each iteration
//! reads the shared flags under the state lock, then emits a pulse and
//! sleeps; the lock is never held across a pin write or a sleep.

use std::sync::{Arc, Mutex};
use std::thread;

use embedded_hal::digital::OutputPin;

use crate::config::PinRole;
use crate::error::ControlError;
use crate::motion::step_interval;
use crate::port::{PinBank, ENABLE_DISABLED};

use super::lock;
use super::state::MotorState;

/// Run the stepping loop until a stop is observed or a fault occurs.
///
/// Termination paths, in priority order per iteration:
/// - `stop_requested`: shutdown sweep, `Ok(())`.
/// - interval not representable for the current rpm: shutdown sweep,
///   `UnrepresentableInterval`.
/// - pin write failure: best-effort disable, the write error. No retry; a
///   failed GPIO write is a hardware fault, not a transient condition.
///
/// While paused the loop keeps its cadence (one sleep per skipped pulse)
/// with STEP held inactive, so resume takes effect within one period.
pub(crate) fn run<O: OutputPin>(
    state: Arc<Mutex<MotorState>>,
    pins: Arc<Mutex<PinBank<O>>>,
    steps_per_revolution: u32,
) -> Result<(), ControlError> {
    log::info!("stepping loop started");

    loop {
        let (stop_requested, paused, rpm) = {
            let s = lock(&state);
            (s.stop_requested, s.paused, s.rpm)
        };

        if stop_requested {
            let result = lock(&pins).shutdown_sweep();
            log::info!("stepping loop stopped");
            return result;
        }

        let Some(interval) = step_interval(rpm, steps_per_revolution) else {
            log::error!("step interval at {} rpm is not representable; stopping", rpm);
            let _ = lock(&pins).shutdown_sweep();
            return Err(ControlError::UnrepresentableInterval { rpm });
        };

        if !paused {
            // Bind the result so the pin-lock guard in the scrutinee is
            // dropped before the disable write re-locks below (the `if let`
            // temporary would otherwise live through the body and deadlock).
            let pulsed = lock(&pins).pulse_step();
            if let Err(e) = pulsed {
                log::error!("step pulse failed ({}); stopping", e);
                let _ = lock(&pins).write(PinRole::Enable, ENABLE_DISABLED);
                return Err(e);
            }
        }

        thread::sleep(interval);
    }
}
