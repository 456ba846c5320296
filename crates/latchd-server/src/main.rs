//! Main entry point for the latchd door lock server.
//!
//! Wires the lock controller to the HTTP control endpoint and makes sure
//! the pending auto-close task is cancelled before the process exits.

use std::sync::Arc;

use latchd_core::{ActuatorDriver, LockController, SimulatedPwm};
use latchd_server::{
    auth::AuthGate,
    model::{AppState, Configuration},
    startup,
};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = Configuration::new();
    let _logging_guard = startup::init_logging(&configuration)?;

    let backend = SimulatedPwm::new(configuration.gpio_pin());
    let controller = LockController::new(ActuatorDriver::new(Box::new(backend)));
    let auth_gate = AuthGate::new(configuration.auth_username(), configuration.auth_password());

    let app_state = Arc::new(AppState {
        controller: controller.clone(),
        auth_gate,
    });

    let address = configuration.server_address();
    let port = configuration.server_port();
    let server = startup::control_server(app_state, address.clone(), port)?;
    info!(%address, port, pin = configuration.gpio_pin(), "latchd listening");

    let result = server.await;

    // A deferred relock must never fire against a torn-down actuator
    controller.shutdown().await;
    info!("server shutting down");

    result?;
    Ok(())
}
