//! Diagnostic Log Sink Port - Where finished diagnostics are reported.
//!
//! Callers treat every error as "could not log"; nothing here may affect
//! the quiz flow.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::diagnostic::DiagnosticLogPayload;

/// Acknowledgement from the sink. The id is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogReceipt {
    pub id: String,
}

/// Errors that can occur while sending a log payload
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogSinkError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Sink rejected payload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed sink response: {0}")]
    MalformedResponse(String),
}

/// Port for the analytics sink
#[async_trait]
pub trait DiagnosticLogSink: Send + Sync {
    /// Delivers one payload.
    ///
    /// # Errors
    /// `Network` when the sink cannot be reached, `Rejected` for a non-2xx
    /// answer, `MalformedResponse` when a 2xx body carries no id
    async fn send(&self, payload: &DiagnosticLogPayload) -> Result<LogReceipt, LogSinkError>;
}
