//! Motor control module.
//!
//! [`MotionController`] is the public surface; [`MotorState`] is the record
//! behind its lock; the stepping loop lives in `worker`.

mod controller;
mod state;
mod worker;

pub use controller::MotionController;
pub use state::MotorState;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the guard from a poisoned lock.
///
/// A panic in one iteration of the stepping loop must not wedge every
/// subsequent controller operation; the state it protects stays consistent
/// because each critical section is a handful of field assignments.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
