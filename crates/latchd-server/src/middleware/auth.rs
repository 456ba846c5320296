// Authentication middleware for Actix-web
// Verifies HTTP Basic credentials before any request reaches the handlers

use actix_service::forward_ready;
use actix_utils::future::{Ready, ok};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web::Data,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::future::LocalBoxFuture;
use tracing::debug;

use crate::model::common::AppState;

const AUTHORIZATION_HEADER: &str = "Authorization";
const BASIC_PREFIX: &str = "Basic ";
const CHALLENGE: (&str, &str) = ("WWW-Authenticate", "Basic realm=\"Login Required\"");

// Basic-auth middleware transformer
pub struct BasicAuth;

impl<S, B> Transform<S, ServiceRequest> for BasicAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(BasicAuthMiddleware { service })
    }
}

pub struct BasicAuthMiddleware<S> {
    service: S,
}

/// Extract the credential pair from an `Authorization: Basic` header.
///
/// Returns `None` for a missing header, a non-Basic scheme, invalid
/// base64, or a payload without the `user:pass` separator. The caller
/// treats all of those like a mismatched credential.
fn extract_credentials(req: &ServiceRequest) -> Option<(String, String)> {
    let header_val = req.headers().get(AUTHORIZATION_HEADER)?;
    let value = header_val.to_str().ok()?.trim();
    let encoded = value.strip_prefix(BASIC_PREFIX)?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// 401 challenge sent for missing or mismatched credentials.
fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().insert_header(CHALLENGE).body(
        "Could not verify your access level for that URL.\n\
         You have to login with proper credentials",
    )
}

impl<S, B> Service<ServiceRequest> for BasicAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let verified = match req.app_data::<Data<AppState>>() {
            Some(app_state) => match extract_credentials(&req) {
                Some((username, password)) => {
                    let ok = app_state.auth_gate.verify(&username, &password);
                    if !ok {
                        debug!(username = %username, "credential mismatch");
                    }
                    ok
                }
                None => {
                    debug!("request without usable basic credentials");
                    false
                }
            },
            None => {
                tracing::error!("AppState not found in request app_data");
                false
            }
        };

        if !verified {
            let response = unauthorized();
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let res = self.service.call(req);

        Box::pin(async move { res.await.map(ServiceResponse::map_into_left_body) })
    }
}
