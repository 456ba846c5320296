//! Hardware boundary for the latch servo
//!
//! The core never touches GPIO directly; it drives a `PwmBackend`, which a
//! deployment implements against its own GPIO/PWM stack. `SimulatedPwm` is
//! the backend used on development hosts and in tests.

use tracing::debug;

use crate::error::HardwareError;

/// Abstract PWM capability consumed by the actuator driver.
///
/// Implementations control a single output pin driving the latch servo.
/// Calls are serialized by the lock controller; implementations do not
/// need to be re-entrant.
pub trait PwmBackend: Send {
    /// Drive the servo control pin high.
    fn energize(&mut self) -> Result<(), HardwareError>;

    /// Apply a duty cycle, in percent of the PWM period.
    fn set_duty_cycle(&mut self, duty: f64) -> Result<(), HardwareError>;

    /// Drive the servo control pin low.
    fn de_energize(&mut self) -> Result<(), HardwareError>;
}

/// Backend that traces commands instead of touching hardware.
///
/// Used when latchd runs on a host without the servo attached.
pub struct SimulatedPwm {
    pin: u8,
}

impl SimulatedPwm {
    pub fn new(pin: u8) -> Self {
        Self { pin }
    }
}

impl PwmBackend for SimulatedPwm {
    fn energize(&mut self) -> Result<(), HardwareError> {
        debug!(pin = self.pin, "pwm energize");
        Ok(())
    }

    fn set_duty_cycle(&mut self, duty: f64) -> Result<(), HardwareError> {
        debug!(pin = self.pin, duty, "pwm duty cycle");
        Ok(())
    }

    fn de_energize(&mut self) -> Result<(), HardwareError> {
        debug!(pin = self.pin, "pwm de-energize");
        Ok(())
    }
}
