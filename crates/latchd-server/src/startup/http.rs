//! HTTP server setup for the control endpoint.

use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};

use crate::{api, middleware::auth::BasicAuth, model::common::AppState};

/// Creates and binds the control HTTP server.
///
/// Every route sits behind the basic-auth middleware; unauthenticated
/// requests never reach a handler.
pub fn control_server(
    app_state: Arc<AppState>,
    address: String,
    port: u16,
) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(BasicAuth)
            .app_data(web::Data::from(app_state.clone()))
            .service(api::control::routes())
    })
    .bind((address, port))?
    .run())
}
