//! In-Memory Log Sink Adapter
//!
//! Records every payload it is given. Can be told to fail so callers can
//! check that logging failures stay contained.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::diagnostic::DiagnosticLogPayload;
use crate::domain::foundation::{LogEntryId, Timestamp};
use crate::ports::{DiagnosticLogSink, LogReceipt, LogSinkError};

/// In-memory sink
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogSink {
    payloads: Arc<RwLock<Vec<DiagnosticLogPayload>>>,
    failure: Arc<RwLock<Option<LogSinkError>>>,
}

impl InMemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every send fails with `error`
    pub fn failing(error: LogSinkError) -> Self {
        Self {
            payloads: Arc::default(),
            failure: Arc::new(RwLock::new(Some(error))),
        }
    }

    /// Payloads received so far, including ones that were then failed
    pub async fn payloads(&self) -> Vec<DiagnosticLogPayload> {
        self.payloads.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.payloads.read().await.len()
    }
}

#[async_trait]
impl DiagnosticLogSink for InMemoryLogSink {
    async fn send(&self, payload: &DiagnosticLogPayload) -> Result<LogReceipt, LogSinkError> {
        self.payloads.write().await.push(payload.clone());

        if let Some(error) = self.failure.read().await.clone() {
            return Err(error);
        }

        Ok(LogReceipt {
            id: LogEntryId::generate(Timestamp::now()).to_string(),
        })
    }
}
