//! HTTP adapters - REST API implementations.

pub mod log_diagnostic;

pub use log_diagnostic::{cors_layer, log_diagnostic_router, LogEndpointState};
