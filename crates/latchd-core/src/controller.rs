//! Lock state machine with automatic relock
//!
//! `LockController` owns the lock state, the actuator, and the pending
//! auto-close task behind a single mutex, so a manual toggle and the
//! auto-close timer can never observe each other mid-transition.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{error, info};

use crate::actuator::ActuatorDriver;
use crate::error::ActuatorError;
use crate::scheduler::{AutoCloseScheduler, TaskHandle};

/// Servo angle for the mechanically locked position.
pub const LOCKED_ANGLE: f64 = 0.0;
/// Servo angle for the mechanically unlocked position.
pub const UNLOCKED_ANGLE: f64 = 180.0;
/// Dwell time before an unlocked door relocks itself.
pub const AUTO_CLOSE_DELAY: Duration = Duration::from_secs(120);

/// Current position of the lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
}

impl std::fmt::Display for LockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockState::Locked => write!(f, "locked"),
            LockState::Unlocked => write!(f, "unlocked"),
        }
    }
}

/// State guarded as one unit: a toggle and a firing timer both take this
/// mutex for their entire transition, actuator motion included.
struct LockInner {
    state: LockState,
    auto_close: Option<TaskHandle>,
    actuator: ActuatorDriver,
}

/// Owns the lock state and the pending auto-close task.
///
/// The state only changes after the corresponding actuator move has
/// succeeded; a failed physical move is never masked by an optimistic
/// state flip.
pub struct LockController {
    inner: Mutex<LockInner>,
    weak_self: Weak<LockController>,
}

impl LockController {
    /// Creates a controller in the `Locked` state with no pending
    /// auto-close.
    pub fn new(actuator: ActuatorDriver) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            inner: Mutex::new(LockInner {
                state: LockState::Locked,
                auto_close: None,
                actuator,
            }),
            weak_self: weak.clone(),
        })
    }

    /// Flips the lock to the opposite state and returns the new state.
    ///
    /// Unlocking arms a 120 s auto-close; locking cancels any pending one.
    /// The caller is held for the actuator's full movement time, and a
    /// concurrent toggle waits for this one to finish. On an actuator
    /// fault neither the state nor the pending task changes.
    pub async fn toggle(&self) -> Result<LockState, ActuatorError> {
        let mut inner = self.inner.lock().await;
        match inner.state {
            LockState::Locked => {
                inner.actuator.set_angle(UNLOCKED_ANGLE).await?;
                inner.state = LockState::Unlocked;

                // There should be no live task while locked; cancel any
                // stale handle before arming the new one.
                if let Some(stale) = inner.auto_close.take() {
                    stale.cancel();
                }
                let controller = self.weak_self.clone();
                inner.auto_close = Some(AutoCloseScheduler::schedule(
                    AUTO_CLOSE_DELAY,
                    async move {
                        if let Some(controller) = controller.upgrade() {
                            controller.auto_close().await;
                        }
                    },
                ));

                info!(dwell_secs = AUTO_CLOSE_DELAY.as_secs(), "door unlocked");
                Ok(LockState::Unlocked)
            }
            LockState::Unlocked => {
                inner.actuator.set_angle(LOCKED_ANGLE).await?;
                inner.state = LockState::Locked;

                if let Some(task) = inner.auto_close.take() {
                    task.cancel();
                }

                info!("door locked");
                Ok(LockState::Locked)
            }
        }
    }

    /// Relock action run by the auto-close timer.
    ///
    /// Takes the same mutex as `toggle`, so it either runs before a racing
    /// toggle (which then observes `Locked`) or is cancelled while still
    /// waiting for the lock.
    async fn auto_close(&self) {
        info!("auto-close dwell elapsed, locking the door");
        let mut inner = self.inner.lock().await;

        if inner.state == LockState::Locked {
            // A manual toggle won the race; nothing left to do.
            inner.auto_close = None;
            return;
        }

        match inner.actuator.set_angle(LOCKED_ANGLE).await {
            Ok(()) => {
                inner.state = LockState::Locked;
                info!("door locked by auto-close");
            }
            Err(err) => {
                // Not retried: repeated unsupervised motion against a
                // faulting mechanism needs human intervention.
                error!(error = %err, "auto-close relock failed, door remains unlocked");
            }
        }
        inner.auto_close = None;
    }

    /// Current lock state.
    pub async fn state(&self) -> LockState {
        self.inner.lock().await.state
    }

    /// Whether an auto-close task is armed and has not yet fired.
    pub async fn has_pending_auto_close(&self) -> bool {
        self.inner
            .lock()
            .await
            .auto_close
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Cancels any pending auto-close task.
    ///
    /// Called on shutdown before hardware resources are released, so no
    /// deferred motion command fires against a torn-down actuator.
    pub async fn shutdown(&self) {
        let mut inner = self.inner.lock().await;
        if let Some(task) = inner.auto_close.take() {
            task.cancel();
            info!("pending auto-close cancelled for shutdown");
        }
    }
}
