//! HTTP handlers for the log endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::domain::diagnostic::{validate_payload, DiagnosticConfig};
use crate::domain::foundation::{LogEntryId, Timestamp};

use super::dto::{ErrorResponse, LogDiagnosticResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Question ids every payload must answer.
#[derive(Debug, Clone)]
pub struct LogEndpointState {
    required_answers: Arc<Vec<String>>,
}

impl LogEndpointState {
    pub fn new(config: &DiagnosticConfig) -> Self {
        Self {
            required_answers: Arc::new(config.question_ids().map(str::to_string).collect()),
        }
    }

    pub fn required_answers(&self) -> impl Iterator<Item = &str> {
        self.required_answers.iter().map(String::as_str)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/log-diagnostic - Validate and record a finished diagnostic
pub async fn log_diagnostic(State(state): State<LogEndpointState>, body: Bytes) -> Response {
    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected malformed diagnostic payload");
                return (StatusCode::BAD_REQUEST, Json(ErrorResponse::malformed_json()))
                    .into_response();
            }
        }
    };

    if let Err(e) = validate_payload(&payload, state.required_answers()) {
        tracing::warn!(error = %e, "Payload validation failed");
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string()))).into_response();
    }

    let id = LogEntryId::generate(Timestamp::now());
    let mut entry = payload;
    if let Value::Object(fields) = &mut entry {
        fields.insert("id".to_string(), Value::String(id.to_string()));
    }
    tracing::info!(diagnostic_id = %id, entry = %entry, "Diagnostic logged");

    (StatusCode::OK, Json(LogDiagnosticResponse::logged(&id))).into_response()
}

/// OPTIONS /api/log-diagnostic - Bare preflight without CORS headers
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on the log endpoint
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::method_not_allowed()),
    )
        .into_response()
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
