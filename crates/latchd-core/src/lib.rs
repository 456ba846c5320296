//! Latchd Core - Lock state machine and actuator control
//!
//! This crate provides the components that keep the physical lock
//! consistent:
//! - `ActuatorDriver`: angle-to-duty mapping and motion timing for the
//!   latch servo
//! - `AutoCloseScheduler`: one-shot cancellable deferred tasks
//! - `LockController`: the locked/unlocked state machine with automatic
//!   relock after a fixed dwell
//! - `PwmBackend`: the hardware boundary consumed by the driver

pub mod actuator;
pub mod controller;
pub mod error;
pub mod hardware;
pub mod scheduler;

// Re-exports for convenience
pub use actuator::{ActuatorDriver, MAX_DUTY, MIN_DUTY};
pub use controller::{AUTO_CLOSE_DELAY, LOCKED_ANGLE, LockController, LockState, UNLOCKED_ANGLE};
pub use error::{ActuatorError, HardwareError};
pub use hardware::{PwmBackend, SimulatedPwm};
pub use scheduler::{AutoCloseScheduler, TaskHandle};
