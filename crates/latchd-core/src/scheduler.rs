//! One-shot deferred task scheduling
//!
//! The lock controller uses this to arm the auto-relock: a single task
//! that fires once after a delay unless cancelled first.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a scheduled task.
///
/// Dropping the handle does not cancel the task; only [`TaskHandle::cancel`]
/// does.
pub struct TaskHandle {
    inner: JoinHandle<()>,
}

impl TaskHandle {
    /// Cancels the task if it has not fired yet.
    ///
    /// Idempotent: cancelling an already-fired or already-cancelled task is
    /// a no-op.
    pub fn cancel(&self) {
        self.inner.abort();
    }

    /// Whether the task has fired or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

/// Schedules one-shot deferred invocations.
pub struct AutoCloseScheduler;

impl AutoCloseScheduler {
    /// Arms `action` to run once after `delay`, unless cancelled first.
    pub fn schedule<F>(delay: Duration, action: F) -> TaskHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let inner = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });
        TaskHandle { inner }
    }
}
