//! Actuator driver for the latch servo
//!
//! Maps angles to duty cycles for a standard 50 Hz hobby servo and holds
//! the control signal long enough for the horn to physically reach the
//! commanded position before de-energizing.

use std::time::Duration;

use tracing::warn;

use crate::error::ActuatorError;
use crate::hardware::PwmBackend;

/// Duty cycle (percent) commanding the 0 degree position.
pub const MIN_DUTY: f64 = 2.5;
/// Duty cycle (percent) commanding the 180 degree position.
pub const MAX_DUTY: f64 = 12.5;

/// Rated travel time per 60 degrees of rotation, in seconds.
const SECONDS_PER_60_DEGREES: f64 = 0.17;
/// Fixed settle buffer added to every move, in seconds.
const SETTLE_BUFFER_SECONDS: f64 = 0.1;

/// Drives a single latch servo through a [`PwmBackend`].
///
/// Tracks the last commanded angle so each move can be held for a duration
/// matched to the actual angular distance travelled. Non-reentrant: the
/// lock controller serializes all motion commands.
pub struct ActuatorDriver {
    backend: Box<dyn PwmBackend>,
    last_angle: f64,
}

impl ActuatorDriver {
    /// Creates a driver assuming the latch starts in the locked (0 degree)
    /// position.
    pub fn new(backend: Box<dyn PwmBackend>) -> Self {
        Self {
            backend,
            last_angle: 0.0,
        }
    }

    /// Last successfully commanded angle, in degrees.
    pub fn last_angle(&self) -> f64 {
        self.last_angle
    }

    /// Duty cycle for a target angle, linear over the servo's range.
    pub fn duty_for_angle(angle: f64) -> f64 {
        MIN_DUTY + (angle / 180.0) * (MAX_DUTY - MIN_DUTY)
    }

    /// Hold time for a move from the last known angle to `angle`.
    pub fn move_duration(&self, angle: f64) -> Duration {
        let angle_change = (angle - self.last_angle).abs();
        Duration::from_secs_f64(
            (angle_change / 60.0) * SECONDS_PER_60_DEGREES + SETTLE_BUFFER_SECONDS,
        )
    }

    /// Moves the servo to `angle` degrees.
    ///
    /// Energizes the pin, applies the duty cycle, waits out the computed
    /// move duration, then de-energizes and zeroes the duty cycle to
    /// prevent idle jitter. The await blocks the caller for the full
    /// movement time; that is deliberate, since reporting success before
    /// the horn has physically arrived would let state run ahead of the
    /// mechanism.
    ///
    /// On any hardware fault the last known angle is left unchanged, so
    /// subsequent move durations stay based on the last known-good
    /// position rather than the attempted one.
    pub async fn set_angle(&mut self, angle: f64) -> Result<(), ActuatorError> {
        if !(0.0..=180.0).contains(&angle) {
            warn!(angle, "rejecting out-of-range angle");
            return Err(ActuatorError::InvalidAngle(angle));
        }

        let duty = Self::duty_for_angle(angle);
        let move_time = self.move_duration(angle);

        self.backend.energize()?;
        self.backend.set_duty_cycle(duty)?;
        tokio::time::sleep(move_time).await;
        self.backend.de_energize()?;
        self.backend.set_duty_cycle(0.0)?;

        self.last_angle = angle;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{FailingPwm, PwmCommand, RecordingPwm};
    use super::*;

    #[test]
    fn duty_endpoints_are_exact() {
        assert_eq!(ActuatorDriver::duty_for_angle(0.0), 2.5);
        assert_eq!(ActuatorDriver::duty_for_angle(180.0), 12.5);
    }

    #[test]
    fn duty_midpoint_is_linear() {
        assert_eq!(ActuatorDriver::duty_for_angle(90.0), 7.5);
    }

    #[test]
    fn move_duration_with_no_travel_is_buffer_only() {
        let (backend, _) = RecordingPwm::new();
        let driver = ActuatorDriver::new(Box::new(backend));
        assert_eq!(driver.move_duration(0.0), Duration::from_secs_f64(0.1));
    }

    #[test]
    fn move_duration_is_monotonic_in_travel_distance() {
        let (backend, _) = RecordingPwm::new();
        let driver = ActuatorDriver::new(Box::new(backend));
        let full = driver.move_duration(180.0);
        let half = driver.move_duration(90.0);
        let none = driver.move_duration(0.0);
        assert!(full > half);
        assert!(half > none);
        // 180 degrees at 0.17 s per 60 degrees plus the 0.1 s buffer
        assert_eq!(full, Duration::from_secs_f64(0.17 * 3.0 + 0.1));
    }

    #[tokio::test(start_paused = true)]
    async fn set_angle_issues_full_command_sequence() {
        let (backend, commands) = RecordingPwm::new();
        let mut driver = ActuatorDriver::new(Box::new(backend));

        driver.set_angle(180.0).await.unwrap();

        assert_eq!(
            *commands.lock().unwrap(),
            vec![
                PwmCommand::Energize,
                PwmCommand::DutyCycle(12.5),
                PwmCommand::DeEnergize,
                PwmCommand::DutyCycle(0.0),
            ]
        );
        assert_eq!(driver.last_angle(), 180.0);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_angle_performs_no_hardware_action() {
        let (backend, commands) = RecordingPwm::new();
        let mut driver = ActuatorDriver::new(Box::new(backend));

        let err = driver.set_angle(181.0).await.unwrap_err();
        assert!(matches!(err, ActuatorError::InvalidAngle(_)));
        assert!(commands.lock().unwrap().is_empty());
        assert_eq!(driver.last_angle(), 0.0);

        let err = driver.set_angle(-1.0).await.unwrap_err();
        assert!(matches!(err, ActuatorError::InvalidAngle(_)));
        assert!(commands.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn hardware_fault_leaves_last_angle_unchanged() {
        let mut driver = ActuatorDriver::new(Box::new(FailingPwm));

        let err = driver.set_angle(180.0).await.unwrap_err();
        assert!(matches!(err, ActuatorError::Fault(_)));
        assert_eq!(driver.last_angle(), 0.0);
        // Timing for the next attempt is still based on the known-good 0
        assert_eq!(
            driver.move_duration(180.0),
            Duration::from_secs_f64(0.17 * 3.0 + 0.1)
        );
    }
}
