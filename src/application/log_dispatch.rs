//! LogDispatcher - Fire-and-forget delivery of the completion payload.
//!
//! Sink failures are logged and folded into [`LogOutcome::NotLogged`]; no
//! error ever reaches the caller.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::diagnostic::{Answer, DiagnosticLogPayload, RecommendationCategory};
use crate::domain::foundation::Timestamp;
use crate::ports::DiagnosticLogSink;

/// What happened to one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutcome {
    Logged { id: String },
    NotLogged { reason: String },
}

impl LogOutcome {
    pub fn is_logged(&self) -> bool {
        matches!(self, LogOutcome::Logged { .. })
    }
}

/// Hands payloads to a sink.
#[derive(Clone)]
pub struct LogDispatcher {
    sink: Arc<dyn DiagnosticLogSink>,
}

impl LogDispatcher {
    pub fn new(sink: Arc<dyn DiagnosticLogSink>) -> Self {
        Self { sink }
    }

    /// Stamps a payload with the current time and sends it.
    pub async fn log_completion(
        &self,
        answers: &BTreeMap<String, Answer>,
        score: u32,
        category: RecommendationCategory,
    ) -> LogOutcome {
        let payload = DiagnosticLogPayload::new(answers, score, category, Timestamp::now());
        self.dispatch(payload).await
    }

    /// Sends `payload`, absorbing every failure.
    pub async fn dispatch(&self, payload: DiagnosticLogPayload) -> LogOutcome {
        match self.sink.send(&payload).await {
            Ok(receipt) => {
                tracing::info!(
                    diagnostic_id = %receipt.id,
                    score = payload.score,
                    recommendation = %payload.recommendation,
                    "Diagnostic logged"
                );
                LogOutcome::Logged { id: receipt.id }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not log diagnostic");
                LogOutcome::NotLogged {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Sends `payload` on a background task. Awaiting the handle is optional.
    pub fn spawn(&self, payload: DiagnosticLogPayload) -> JoinHandle<LogOutcome> {
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.dispatch(payload).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logging::InMemoryLogSink;
    use crate::ports::LogSinkError;

    fn answers() -> BTreeMap<String, Answer> {
        BTreeMap::from([
            ("pathway".to_string(), Answer::record("pathway", "No", 2).unwrap()),
            ("severity".to_string(), Answer::record("severity", "Yes", 0).unwrap()),
        ])
    }

    #[tokio::test]
    async fn log_completion_sends_points_only() {
        let sink = Arc::new(InMemoryLogSink::new());
        let dispatcher = LogDispatcher::new(sink.clone());

        let outcome = dispatcher
            .log_completion(&answers(), 2, RecommendationCategory::OptionalConfirmation)
            .await;

        assert!(outcome.is_logged());
        let sent = sink.payloads().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].answers["pathway"], 2);
        assert_eq!(sent[0].score, 2);
    }

    #[tokio::test]
    async fn sink_failure_becomes_not_logged() {
        let sink = Arc::new(InMemoryLogSink::failing(LogSinkError::Rejected {
            status: 500,
            message: "Internal server error. Please try again later.".to_string(),
        }));
        let dispatcher = LogDispatcher::new(sink);

        let outcome = dispatcher
            .log_completion(&answers(), 2, RecommendationCategory::OptionalConfirmation)
            .await;

        match outcome {
            LogOutcome::NotLogged { reason } => assert!(reason.contains("500")),
            other => panic!("expected NotLogged, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn spawned_dispatch_can_be_awaited() {
        let sink = Arc::new(InMemoryLogSink::new());
        let dispatcher = LogDispatcher::new(sink.clone());
        let payload = DiagnosticLogPayload::new(
            &answers(),
            2,
            RecommendationCategory::OptionalConfirmation,
            Timestamp::now(),
        );

        let outcome = dispatcher.spawn(payload).await.unwrap();
        assert!(outcome.is_logged());
        assert_eq!(sink.count().await, 1);
    }
}
