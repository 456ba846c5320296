//! Shared application state for the HTTP layer

use std::sync::Arc;

use latchd_core::LockController;

use crate::auth::AuthGate;

/// State shared across request handlers and middleware.
pub struct AppState {
    /// The single lock this daemon controls.
    pub controller: Arc<LockController>,
    /// Expected credential pair for the control endpoint.
    pub auth_gate: AuthGate,
}
