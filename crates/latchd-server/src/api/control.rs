// Lock control endpoint
// Maps POST /control onto LockController::toggle

use actix_web::{HttpResponse, Scope, web};
use tracing::{error, info, warn};

use latchd_core::LockState;

use crate::model::common::AppState;

const ACTION_TOGGLE: &str = "toggle";

/// Handles `POST /control` with a JSON body carrying an `action` field.
///
/// Only `"toggle"` is recognized; a missing or unknown action is rejected
/// before any actuator command is issued.
pub async fn control(
    app_state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    let action = body.get("action").and_then(|v| v.as_str());

    if action != Some(ACTION_TOGGLE) {
        warn!(action = ?action, "rejecting unknown control action");
        return HttpResponse::BadRequest().body("Invalid action");
    }

    match app_state.controller.toggle().await {
        Ok(state) => {
            info!(%state, "control toggle applied");
            match state {
                LockState::Unlocked => HttpResponse::Ok().body("Door unlocked"),
                LockState::Locked => HttpResponse::Ok().body("Door locked"),
            }
        }
        Err(err) => {
            error!(error = %err, "toggle failed, lock state unchanged");
            HttpResponse::InternalServerError().body(format!("Lock actuation failed: {err}"))
        }
    }
}

/// Configure control routes.
pub fn routes() -> Scope {
    web::scope("").route("/control", web::post().to(control))
}
