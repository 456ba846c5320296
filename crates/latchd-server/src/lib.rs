// Main library module for Latchd - a network-controlled door lock daemon
// The core lock logic lives in latchd-core; this crate wires it to HTTP.

// Module declarations
pub mod api; // Control endpoint handlers
pub mod auth; // Credential verification
pub mod middleware; // HTTP middleware
pub mod model; // AppState and configuration
pub mod startup; // Application startup utilities
