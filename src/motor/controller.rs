//! The motion controller: public operation surface over one motor.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::config::{validate_config, ControllerConfig, PinRole};
use crate::error::{ControlError, Result};
use crate::motion::{Direction, MicrostepResolution};
use crate::port::{OutputPort, PinBank, ENABLE_ACTIVE, ENABLE_DISABLED};

use super::lock;
use super::state::MotorState;
use super::worker;

/// Velocity-mode controller for one stepper motor behind a step/direction
/// driver carrier.
///
/// Owns the claimed pins and the shared [`MotorState`], and runs at most one
/// stepping loop thread at a time. All configuration operations are safe to
/// call while the loop is running; each takes the controller's per-instance
/// state lock, and the loop observes changes at its next iteration boundary
/// (at most one step interval of staleness).
///
/// # Example
///
/// ```rust,ignore
/// use stepper_velocity::{ControllerConfig, Direction, MotionController};
///
/// let mut motor = MotionController::new(gpio_port, ControllerConfig::default())?;
/// motor.set_direction(Direction::Clockwise)?;
/// motor.start()?;
/// // ... later, from any caller:
/// motor.set_speed(120)?;
/// motor.stop()?;
/// motor.wait_until_stopped()?;
/// motor.shutdown()?;
/// ```
pub struct MotionController<P: OutputPort> {
    port: P,
    steps_per_revolution: u32,
    state: Arc<Mutex<MotorState>>,
    pins: Arc<Mutex<PinBank<P::Output>>>,
    worker: Option<JoinHandle<core::result::Result<(), ControlError>>>,
    last_fault: Option<ControlError>,
    released: bool,
}

impl<P: OutputPort> MotionController<P> {
    /// Create a controller: validate the configuration, claim every assigned
    /// pin as an output, drive all pins low, then drive ENABLE to its
    /// disabled level so the motor draws no holding current yet.
    ///
    /// The configured microstep resolution is written to MS1..MS3 so the pin
    /// levels match the initial [`MotorState`].
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an invalid configuration and
    /// `ControlError::PinClaim`/`PinWrite` for port failures. No pins remain
    /// claimed on error.
    pub fn new(mut port: P, config: ControllerConfig) -> Result<Self> {
        validate_config(&config)?;

        let mut bank = PinBank::claim(&mut port, &config.pins)?;

        let setup = bank
            .drive_all_low()
            .and_then(|()| bank.write(PinRole::Enable, ENABLE_DISABLED))
            .and_then(|()| bank.write_select_pattern(config.resolution.select_pattern()));

        if let Err(e) = setup {
            bank.release_all(&mut port);
            return Err(e.into());
        }

        let steps_per_revolution = config.steps_per_revolution();
        log::info!(
            "controller ready: {} steps/rev, {} rpm",
            steps_per_revolution,
            config.rpm
        );

        Ok(Self {
            port,
            steps_per_revolution,
            state: Arc::new(Mutex::new(MotorState::new(&config))),
            pins: Arc::new(Mutex::new(bank)),
            worker: None,
            last_fault: None,
            released: false,
        })
    }

    /// Set the rotation direction.
    ///
    /// Contract: changing direction also drives ENABLE to its active level,
    /// re-energizing the driver — direction is only meaningful while the
    /// driver holds its position. Callers who want the motor left disabled
    /// after a direction change must call [`disable`](Self::disable) again.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        {
            let mut state = lock(&self.state);
            state.direction = direction;
            state.enabled = true;
        }
        let mut pins = lock(&self.pins);
        pins.write(PinRole::Direction, direction.pin_state())?;
        pins.write(PinRole::Enable, ENABLE_ACTIVE)?;
        log::debug!("direction set to {:?}", direction);
        Ok(())
    }

    /// Select the microstep resolution, writing its pattern to MS1..MS3.
    ///
    /// Idempotent per value: repeating a resolution rewrites the same levels.
    pub fn set_microstep_resolution(&mut self, resolution: MicrostepResolution) -> Result<()> {
        {
            lock(&self.state).resolution = resolution;
        }
        lock(&self.pins).write_select_pattern(resolution.select_pattern())?;
        log::debug!("microstep resolution set to {:?}", resolution);
        Ok(())
    }

    /// Set the target speed in revolutions per minute.
    ///
    /// Takes effect at the loop's next iteration; an in-flight pulse keeps
    /// its timing.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::InvalidRpm` for `rpm == 0`; state is unchanged.
    pub fn set_speed(&mut self, rpm: u32) -> Result<()> {
        if rpm == 0 {
            return Err(ControlError::InvalidRpm(rpm).into());
        }
        lock(&self.state).rpm = rpm;
        log::debug!("speed set to {} rpm", rpm);
        Ok(())
    }

    /// Start the stepping loop.
    ///
    /// Re-arms `paused`/`stop_requested`, drives ENABLE active, and spawns
    /// the worker thread. A controller stopped earlier can be started again.
    ///
    /// # Errors
    ///
    /// `ControlError::AlreadyRunning` if a loop is active,
    /// `ControlError::Released` after [`shutdown`](Self::shutdown).
    pub fn start(&mut self) -> Result<()>
    where
        P::Output: Send + 'static,
    {
        if self.released {
            return Err(ControlError::Released.into());
        }
        if self.is_running() {
            return Err(ControlError::AlreadyRunning.into());
        }
        // Reap a loop that already terminated on its own, keeping its fault.
        self.reap_worker();

        {
            let mut state = lock(&self.state);
            state.stop_requested = false;
            state.paused = false;
            state.enabled = true;
        }
        lock(&self.pins).write(PinRole::Enable, ENABLE_ACTIVE)?;

        let state = Arc::clone(&self.state);
        let pins = Arc::clone(&self.pins);
        let steps_per_revolution = self.steps_per_revolution;
        self.worker = Some(thread::spawn(move || {
            worker::run(state, pins, steps_per_revolution)
        }));
        Ok(())
    }

    /// Request loop shutdown. Non-blocking.
    ///
    /// The loop performs the actual shutdown (STEP inactive, driver
    /// disabled) on its next iteration, within one step interval. Use
    /// [`wait_until_stopped`](Self::wait_until_stopped) to await completion.
    pub fn stop(&mut self) {
        let mut state = lock(&self.state);
        state.stop_requested = true;
        state.enabled = false;
    }

    /// Block until the stepping loop has exited, surfacing its result.
    ///
    /// Returns `Ok(())` immediately when no loop is active. A fault that
    /// terminated the loop (`PinWrite`, `UnrepresentableInterval`) is
    /// returned here exactly once and afterwards available via
    /// [`last_fault`](Self::last_fault).
    pub fn wait_until_stopped(&mut self) -> Result<()> {
        match self.reap_worker() {
            Some(Err(e)) => Err(e.into()),
            _ => Ok(()),
        }
    }

    /// Toggle pulse emission.
    ///
    /// Pausing is symmetric: two calls restore the previous mode. While
    /// paused the loop holds STEP inactive but keeps running; `stop()` still
    /// takes priority.
    pub fn pause(&mut self) {
        let mut state = lock(&self.state);
        state.paused = !state.paused;
        log::debug!("paused: {}", state.paused);
    }

    /// Toggle pulse emission; the same operation as [`pause`](Self::pause)
    /// under the name callers reach for after pausing.
    pub fn resume(&mut self) {
        self.pause();
    }

    /// Emit exactly one step pulse, ignoring pause/stop flags.
    ///
    /// For callers running their own timing loop (jogging, tests).
    ///
    /// # Errors
    ///
    /// `ControlError::Busy` while the stepping loop is active — the loop
    /// owns the STEP pin for its lifetime.
    pub fn single_step(&mut self) -> Result<()> {
        if self.released {
            return Err(ControlError::Released.into());
        }
        if self.is_running() {
            return Err(ControlError::Busy.into());
        }
        lock(&self.pins).pulse_step()?;
        Ok(())
    }

    /// De-energize the driver by driving ENABLE to its disabled level.
    pub fn disable(&mut self) -> Result<()> {
        lock(&self.state).enabled = false;
        lock(&self.pins).write(PinRole::Enable, ENABLE_DISABLED)?;
        Ok(())
    }

    /// Stop the loop, leave every pin low with the driver disabled, and
    /// release all pins back to the port. Idempotent; also run on drop.
    ///
    /// A fault from the terminating loop is remembered in
    /// [`last_fault`](Self::last_fault) rather than failing the shutdown.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.stop();
        self.reap_worker();

        let mut pins = lock(&self.pins);
        // The loop already swept on a clean exit; repeat for the never-started
        // and faulted cases. Errors here must not prevent the release.
        if let Err(e) = pins.shutdown_sweep() {
            log::warn!("shutdown sweep failed: {}", e);
        }
        pins.release_all(&mut self.port);
        drop(pins);

        self.released = true;
        log::info!("controller shut down");
        Ok(())
    }

    /// The most recent fault that terminated a stepping loop, if any.
    pub fn last_fault(&self) -> Option<&ControlError> {
        self.last_fault.as_ref()
    }

    /// Whether the stepping loop thread is currently alive.
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Whether pulse emission is currently paused.
    pub fn is_paused(&self) -> bool {
        lock(&self.state).paused
    }

    /// Current target speed in rpm.
    pub fn rpm(&self) -> u32 {
        lock(&self.state).rpm
    }

    /// Current rotation direction.
    pub fn direction(&self) -> Direction {
        lock(&self.state).direction
    }

    /// Current microstep resolution.
    pub fn resolution(&self) -> MicrostepResolution {
        lock(&self.state).resolution
    }

    /// Whether the driver is energized.
    pub fn is_enabled(&self) -> bool {
        lock(&self.state).enabled
    }

    /// Full mechanical steps per shaft revolution.
    pub fn steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution
    }

    /// Join a finished or finishing worker, recording any fault.
    fn reap_worker(&mut self) -> Option<core::result::Result<(), ControlError>> {
        let handle = self.worker.take()?;
        let result = handle.join().unwrap_or(Err(ControlError::WorkerPanicked));
        if let Err(ref e) = result {
            self.last_fault = Some(e.clone());
        }
        Some(result)
    }
}

impl<P: OutputPort> Drop for MotionController<P> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::warn!("shutdown on drop failed: {}", e);
        }
    }
}
