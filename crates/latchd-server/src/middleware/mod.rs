// HTTP middleware implementations

pub mod auth; // HTTP Basic authentication in front of the control endpoint
