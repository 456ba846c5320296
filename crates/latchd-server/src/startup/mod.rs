// Application startup utilities

pub mod http;
pub mod logging;

pub use http::control_server;
pub use logging::init_logging;
