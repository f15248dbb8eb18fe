//! HTTP adapter for the diagnostic log endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, LogDiagnosticResponse};
pub use handlers::LogEndpointState;
pub use routes::{cors_layer, log_diagnostic_router};
