//! Control endpoint integration tests
//!
//! Full-stack tests for POST /control: basic-auth middleware, action
//! dispatch, and the lock state transitions behind them. The actuator
//! runs against the simulated PWM backend.

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use latchd_core::{ActuatorDriver, LockController, LockState, SimulatedPwm};
use latchd_server::{api, auth::AuthGate, middleware::auth::BasicAuth, model::AppState};

const USERNAME: &str = "admin";
const PASSWORD: &str = "secret";

fn test_state() -> Arc<AppState> {
    let actuator = ActuatorDriver::new(Box::new(SimulatedPwm::new(14)));
    Arc::new(AppState {
        controller: LockController::new(actuator),
        auth_gate: AuthGate::new(USERNAME.to_string(), PASSWORD.to_string()),
    })
}

fn basic_auth_header(username: &str, password: &str) -> (&'static str, String) {
    let encoded = BASE64.encode(format!("{username}:{password}"));
    ("Authorization", format!("Basic {encoded}"))
}

fn toggle_request(username: &str, password: &str) -> actix_web::test::TestRequest {
    test::TestRequest::post()
        .uri("/control")
        .insert_header(basic_auth_header(username, password))
        .set_json(serde_json::json!({"action": "toggle"}))
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(BasicAuth)
                .app_data(web::Data::from($state.clone()))
                .service(api::control::routes()),
        )
        .await
    };
}

#[actix_web::test]
async fn missing_credentials_are_challenged() {
    let state = test_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/control")
        .set_json(serde_json::json!({"action": "toggle"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers()
            .get("WWW-Authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Basic realm=\"Login Required\"")
    );
    // The controller was never reached
    assert_eq!(state.controller.state().await, LockState::Locked);
    assert!(!state.controller.has_pending_auto_close().await);
}

#[actix_web::test]
async fn wrong_password_is_challenged() {
    let state = test_state();
    let app = init_app!(state);

    let req = toggle_request("admin", "wrong").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers()
            .get("WWW-Authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Basic realm=\"Login Required\"")
    );
    assert_eq!(state.controller.state().await, LockState::Locked);
}

#[actix_web::test]
async fn unknown_action_is_rejected_without_motion() {
    let state = test_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/control")
        .insert_header(basic_auth_header(USERNAME, PASSWORD))
        .set_json(serde_json::json!({"action": "open"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Invalid action");
    assert_eq!(state.controller.state().await, LockState::Locked);
    assert!(!state.controller.has_pending_auto_close().await);
}

#[actix_web::test]
async fn missing_action_field_is_rejected() {
    let state = test_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/control")
        .insert_header(basic_auth_header(USERNAME, PASSWORD))
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Invalid action");
}

#[actix_web::test]
async fn toggle_unlocks_then_locks() {
    let state = test_state();
    let app = init_app!(state);

    let resp = test::call_service(&app, toggle_request(USERNAME, PASSWORD).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Door unlocked");
    assert_eq!(state.controller.state().await, LockState::Unlocked);
    assert!(state.controller.has_pending_auto_close().await);

    let resp = test::call_service(&app, toggle_request(USERNAME, PASSWORD).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Door locked");
    assert_eq!(state.controller.state().await, LockState::Locked);
    assert!(!state.controller.has_pending_auto_close().await);
}
