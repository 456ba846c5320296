//! Error types for the lock core
//!
//! This module defines:
//! - `HardwareError`: faults reported by a PWM backend
//! - `ActuatorError`: failures of an actuator motion command

/// Fault reported by the hardware layer during a pin or duty-cycle
/// operation.
#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct HardwareError(pub String);

/// Actuator-level failures surfaced to the lock controller.
#[derive(thiserror::Error, Debug)]
pub enum ActuatorError {
    /// The requested angle is outside the servo's [0, 180] range. Callers
    /// inside the core only ever request 0 or 180, so this indicates a bug
    /// rather than an operational condition.
    #[error("invalid angle {0}: must be between 0 and 180")]
    InvalidAngle(f64),

    /// The hardware layer failed mid-move. The driver's last known angle
    /// is left unchanged so later timing stays based on the last
    /// known-good position.
    #[error("actuator fault: {0}")]
    Fault(#[from] HardwareError),
}
