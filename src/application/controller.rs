//! DiagnosticController - Drives one diagnostic session for the rendering layer.
//!
//! The rendering layer calls the transition operations in response to user
//! input and reads the getters to redraw. Registered observers are told
//! about every applied change. Persistence and analytics are optional
//! collaborators; when they fail the quiz carries on.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::diagnostic::{
    Answer, AssessmentArea, BookingHandoff, DiagnosticConfig, DiagnosticError,
    DiagnosticLogPayload, DiagnosticSession, DiagnosticState, Question, Recommendation,
    SessionSnapshot, StateChange,
};
use crate::adapters::logging::{HttpLogSink, HttpLogSinkConfig};
use crate::config::{AppConfig, FeatureFlags};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::{DiagnosticObserver, KeyValueStore, LogSinkError};

use super::log_dispatch::{LogDispatcher, LogOutcome};
use super::persistence::SessionPersistence;

/// Result of [`DiagnosticController::complete`].
#[derive(Debug)]
pub struct CompletionReport {
    pub recommendation: Recommendation,
    /// Whether the session record was written.
    pub saved: bool,
    /// Background log delivery, when a dispatcher is configured.
    pub log_task: Option<JoinHandle<LogOutcome>>,
}

/// Single-writer owner of a [`DiagnosticSession`].
pub struct DiagnosticController {
    session: DiagnosticSession,
    persistence: Option<SessionPersistence>,
    dispatcher: Option<LogDispatcher>,
    log_completions: bool,
    observers: Vec<Arc<dyn DiagnosticObserver>>,
}

impl DiagnosticController {
    /// Controller for a fresh session with no store and no log sink.
    pub fn new(config: Arc<DiagnosticConfig>) -> Self {
        Self {
            session: DiagnosticSession::new(config),
            persistence: None,
            dispatcher: None,
            log_completions: true,
            observers: Vec::new(),
        }
    }

    /// Controller wired from application config: file-backed persistence,
    /// and an HTTP log sink when `features.log_completions` is on.
    ///
    /// # Errors
    ///
    /// - `Network` if the HTTP client cannot be built
    pub fn from_app_config(
        config: Arc<DiagnosticConfig>,
        app: &AppConfig,
    ) -> Result<Self, LogSinkError> {
        let controller = Self::new(config)
            .with_persistence(SessionPersistence::from_config(&app.storage))
            .with_feature_flags(&app.features);

        if !app.features.log_completions {
            return Ok(controller);
        }
        let sink = HttpLogSink::new(HttpLogSinkConfig::from(&app.logging))?;
        Ok(controller.with_log_dispatcher(LogDispatcher::new(Arc::new(sink))))
    }

    pub fn with_persistence(mut self, persistence: SessionPersistence) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Persist to `store` under the default key.
    pub fn with_store(self, store: Arc<dyn KeyValueStore>) -> Self {
        self.with_persistence(SessionPersistence::new(store))
    }

    pub fn with_log_dispatcher(mut self, dispatcher: LogDispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn with_feature_flags(mut self, flags: &FeatureFlags) -> Self {
        self.log_completions = flags.log_completions;
        self
    }

    /// Registers an observer. Observers are called in registration order.
    pub fn subscribe(&mut self, observer: Arc<dyn DiagnosticObserver>) {
        self.observers.push(observer);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Getters
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session(&self) -> &DiagnosticSession {
        &self.session
    }

    pub fn session_id(&self) -> &SessionId {
        self.session.id()
    }

    pub fn started_at(&self) -> &Timestamp {
        self.session.started_at()
    }

    pub fn state(&self) -> DiagnosticState {
        self.session.state()
    }

    pub fn answers(&self) -> &std::collections::BTreeMap<String, Answer> {
        self.session.answers()
    }

    pub fn score(&self) -> Option<u32> {
        self.session.score()
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.session.recommendation()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    /// Per-area breakdown shown alongside the recommendation.
    pub fn transparency(&self) -> Vec<AssessmentArea> {
        self.session.transparency()
    }

    /// Payload for the log sink, once a recommendation exists.
    pub fn log_payload(&self) -> Option<DiagnosticLogPayload> {
        self.session.log_payload(Timestamp::now())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn start(&mut self) -> Result<(), DiagnosticError> {
        let change = self.session.start()?;
        tracing::info!(session_id = %self.session.id(), "Diagnostic started");
        self.notify_state(change);
        Ok(())
    }

    pub fn record_answer(
        &mut self,
        question_id: &str,
        answer_text: &str,
        points: i64,
    ) -> Result<(), DiagnosticError> {
        let answer = self
            .session
            .record_answer(question_id, answer_text, points)?
            .clone();
        tracing::debug!(question_id, points = answer.points, "Answer recorded");

        for observer in &self.observers {
            observer.on_answer_recorded(question_id, &answer);
        }
        Ok(())
    }

    /// Records the option whose text is `option_text`, looking its points up
    /// in the questionnaire. Returns the points.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` / `OptionNotFound` for text not in the questionnaire
    pub fn select_option(
        &mut self,
        question_id: &str,
        option_text: &str,
    ) -> Result<u8, DiagnosticError> {
        let points = self.session.scoring().points_for(question_id, option_text)?;
        self.record_answer(question_id, option_text, i64::from(points))?;
        Ok(points)
    }

    pub fn next_question(&mut self) -> Result<DiagnosticState, DiagnosticError> {
        let change = self.session.next_question()?;
        self.notify_state(change);
        if change.to == DiagnosticState::Recommendation {
            self.notify_recommendation();
        }
        Ok(change.to)
    }

    pub fn calculate_score(&mut self) -> u32 {
        self.session.calculate_score()
    }

    /// Jumps to the recommendation screen from anywhere.
    pub fn show_recommendation(&mut self) -> Result<Recommendation, DiagnosticError> {
        let change = self.session.show_recommendation()?;
        self.notify_state(change);
        self.notify_recommendation();

        self.session.recommendation().cloned().ok_or_else(|| {
            DiagnosticError::illegal_transition(change.to, "show recommendation")
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────────────────

    /// Writes the session, stamped with the current time as its end.
    ///
    /// # Errors
    ///
    /// - `StorageUnavailable` if no store is configured or it cannot be reached
    /// - `StorageQuota` if the store refuses the write
    pub async fn save_session(&self) -> Result<(), DiagnosticError> {
        let persistence = self.persistence()?;
        persistence
            .save(&self.session.snapshot(Timestamp::now()))
            .await
    }

    /// Reads back the stored record without touching the live session.
    ///
    /// # Errors
    ///
    /// - `StorageUnavailable` if no store is configured or it cannot be read
    pub async fn load_session(&self) -> Result<Option<SessionSnapshot>, DiagnosticError> {
        self.persistence()?.load().await
    }

    fn persistence(&self) -> Result<&SessionPersistence, DiagnosticError> {
        self.persistence
            .as_ref()
            .ok_or_else(|| DiagnosticError::storage_unavailable("no session store configured"))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Hand-offs
    // ─────────────────────────────────────────────────────────────────────────

    /// Finishes a session on the recommendation screen: saves it and starts
    /// the log delivery. Neither failure is returned.
    ///
    /// # Errors
    ///
    /// - `IllegalTransition` off the recommendation screen
    /// - `InvalidScore` / `UnknownCategory` if the recommendation cannot be built
    pub async fn complete(&mut self) -> Result<CompletionReport, DiagnosticError> {
        if self.state() != DiagnosticState::Recommendation {
            return Err(DiagnosticError::illegal_transition(self.state(), "complete"));
        }

        let recommendation = match self.session.recommendation() {
            Some(recommendation) => recommendation.clone(),
            None => self.show_recommendation()?,
        };

        let saved = match self.save_session().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(session_id = %self.session.id(), error = %e, "Session not saved");
                false
            }
        };

        let log_task = match (&self.dispatcher, self.log_payload()) {
            (Some(dispatcher), Some(payload)) if self.log_completions => {
                Some(dispatcher.spawn(payload))
            }
            _ => None,
        };

        tracing::info!(
            session_id = %self.session.id(),
            score = recommendation.score,
            category = %recommendation.category,
            saved,
            "Diagnostic completed"
        );

        Ok(CompletionReport {
            recommendation,
            saved,
            log_task,
        })
    }

    /// Attribution for the booking widget. Does not wait on the booking.
    ///
    /// # Errors
    ///
    /// - `IllegalTransition` before a recommendation exists
    pub fn booking_requested(&self) -> Result<BookingHandoff, DiagnosticError> {
        let handoff = self.session.booking_handoff(Timestamp::now())?;
        tracing::info!(
            session_id = %handoff.session_id,
            category = %handoff.category,
            "Booking requested"
        );

        for observer in &self.observers {
            observer.on_booking_requested(&handoff);
        }
        Ok(handoff)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────

    fn notify_state(&self, change: StateChange) {
        if !change.is_change() {
            return;
        }
        tracing::debug!(from = %change.from, to = %change.to, "State changed");
        for observer in &self.observers {
            observer.on_state_changed(change.from, change.to);
        }
    }

    fn notify_recommendation(&self) {
        if let Some(recommendation) = self.session.recommendation() {
            for observer in &self.observers {
                observer.on_recommendation_ready(recommendation);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logging::InMemoryLogSink;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::diagnostic::RecommendationCategory;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl DiagnosticObserver for RecordingObserver {
        fn on_state_changed(&self, from: DiagnosticState, to: DiagnosticState) {
            self.events.lock().unwrap().push(format!("state:{}->{}", from, to));
        }

        fn on_answer_recorded(&self, question_id: &str, answer: &Answer) {
            self.events
                .lock()
                .unwrap()
                .push(format!("answer:{}={}", question_id, answer.points));
        }

        fn on_recommendation_ready(&self, recommendation: &Recommendation) {
            self.events
                .lock()
                .unwrap()
                .push(format!("recommendation:{}", recommendation.category));
        }

        fn on_booking_requested(&self, handoff: &BookingHandoff) {
            self.events
                .lock()
                .unwrap()
                .push(format!("booking:{}", handoff.category));
        }
    }

    fn controller() -> DiagnosticController {
        DiagnosticController::new(Arc::new(DiagnosticConfig::standard()))
    }

    fn first_option(controller: &DiagnosticController) -> String {
        controller.current_question().unwrap().options[0].text.clone()
    }

    #[test]
    fn select_option_looks_up_points() {
        let mut controller = controller();
        controller.start().unwrap();

        let text = first_option(&controller);
        let points = controller.select_option("service_connection", &text).unwrap();

        assert_eq!(points, 2);
        assert_eq!(controller.answers()["service_connection"].answer_text, text);
    }

    #[test]
    fn select_option_rejects_unknown_text() {
        let mut controller = controller();
        let err = controller.select_option("pathway", "Maybe").unwrap_err();
        assert!(matches!(err, DiagnosticError::OptionNotFound { .. }));
        assert!(controller.answers().is_empty());
    }

    #[test]
    fn observers_see_events_in_order() {
        let observer = Arc::new(RecordingObserver::default());
        let mut controller = controller();
        controller.subscribe(observer.clone());

        controller.start().unwrap();
        controller.record_answer("service_connection", "No", 2).unwrap();
        for _ in 0..5 {
            controller.next_question().unwrap();
        }
        controller.booking_requested().unwrap();

        assert_eq!(
            observer.events(),
            vec![
                "state:intro->question_1",
                "answer:service_connection=2",
                "state:question_1->question_2",
                "state:question_2->question_3",
                "state:question_3->question_4",
                "state:question_4->question_5",
                "state:question_5->recommendation",
                "recommendation:OPTIONAL_CONFIRMATION",
                "booking:OPTIONAL_CONFIRMATION",
            ]
        );
    }

    #[test]
    fn failed_transition_notifies_nobody() {
        let observer = Arc::new(RecordingObserver::default());
        let mut controller = controller();
        controller.subscribe(observer.clone());

        assert!(controller.next_question().is_err());
        assert!(controller.record_answer("pathway", "No", 5).is_err());
        assert!(observer.events().is_empty());
    }

    #[test]
    fn show_recommendation_twice_notifies_state_once() {
        let observer = Arc::new(RecordingObserver::default());
        let mut controller = controller();
        controller.subscribe(observer.clone());

        controller.show_recommendation().unwrap();
        controller.show_recommendation().unwrap();

        let state_events = observer
            .events()
            .into_iter()
            .filter(|event| event.starts_with("state:"))
            .count();
        assert_eq!(state_events, 1);
    }

    #[tokio::test]
    async fn save_without_store_is_unavailable() {
        let controller = controller();
        assert!(matches!(
            controller.save_session().await,
            Err(DiagnosticError::StorageUnavailable { .. })
        ));
        assert!(matches!(
            controller.load_session().await,
            Err(DiagnosticError::StorageUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn load_session_does_not_touch_live_state() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut first = controller().with_store(store.clone());
        first.record_answer("pathway", "No", 2).unwrap();
        first.show_recommendation().unwrap();
        first.save_session().await.unwrap();

        let second = controller().with_store(store);
        let loaded = second.load_session().await.unwrap().unwrap();

        assert_eq!(loaded.session_id, *first.session_id());
        assert_eq!(second.state(), DiagnosticState::Intro);
        assert!(second.answers().is_empty());
    }

    #[tokio::test]
    async fn complete_requires_recommendation_screen() {
        let mut controller = controller();
        controller.start().unwrap();
        let err = controller.complete().await.unwrap_err();
        assert!(matches!(err, DiagnosticError::IllegalTransition { .. }));
    }

    #[tokio::test]
    async fn complete_recomputes_after_late_edit() {
        let mut controller = controller().with_store(Arc::new(InMemoryKeyValueStore::new()));
        controller.show_recommendation().unwrap();
        controller.record_answer("severity", "No", 2).unwrap();

        let report = controller.complete().await.unwrap();
        assert_eq!(report.recommendation.score, 2);
        assert_eq!(
            report.recommendation.category,
            RecommendationCategory::OptionalConfirmation
        );
    }

    #[tokio::test]
    async fn complete_saves_and_logs() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let sink = Arc::new(InMemoryLogSink::new());
        let mut controller = controller()
            .with_store(store.clone())
            .with_log_dispatcher(LogDispatcher::new(sink.clone()));

        controller.show_recommendation().unwrap();
        let report = controller.complete().await.unwrap();

        assert!(report.saved);
        let outcome = report.log_task.unwrap().await.unwrap();
        assert!(outcome.is_logged());
        assert_eq!(sink.count().await, 1);
        assert!(controller.load_session().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn complete_survives_storage_and_sink_failures() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set_unavailable(true);
        let sink = Arc::new(InMemoryLogSink::failing(LogSinkError::Network(
            "offline".to_string(),
        )));
        let mut controller = controller()
            .with_store(store)
            .with_log_dispatcher(LogDispatcher::new(sink));

        controller.show_recommendation().unwrap();
        let report = controller.complete().await.unwrap();

        assert!(!report.saved);
        let outcome = report.log_task.unwrap().await.unwrap();
        assert!(!outcome.is_logged());
        assert_eq!(controller.state(), DiagnosticState::Recommendation);
    }

    #[test]
    fn booking_before_recommendation_is_illegal() {
        let controller = controller();
        assert!(matches!(
            controller.booking_requested(),
            Err(DiagnosticError::IllegalTransition { .. })
        ));
    }

    #[tokio::test]
    async fn disabled_log_completions_skips_the_sink() {
        let sink = Arc::new(InMemoryLogSink::new());
        let flags = FeatureFlags {
            log_completions: false,
            ..Default::default()
        };
        let mut controller = controller()
            .with_store(Arc::new(InMemoryKeyValueStore::new()))
            .with_log_dispatcher(LogDispatcher::new(sink.clone()))
            .with_feature_flags(&flags);

        controller.show_recommendation().unwrap();
        let report = controller.complete().await.unwrap();

        assert!(report.saved);
        assert!(report.log_task.is_none());
        assert_eq!(sink.count().await, 0);
    }

    #[tokio::test]
    async fn from_app_config_persists_to_configured_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = AppConfig::default();
        app.storage.data_dir = dir.path().to_path_buf();
        app.storage.session_key = "readiness".to_string();
        app.features.log_completions = false;

        let mut controller =
            DiagnosticController::from_app_config(Arc::new(DiagnosticConfig::standard()), &app)
                .unwrap();
        controller.show_recommendation().unwrap();
        let report = controller.complete().await.unwrap();

        assert!(report.saved);
        assert!(report.log_task.is_none());
        assert!(dir.path().join("readiness.json").exists());
        let loaded = controller.load_session().await.unwrap().unwrap();
        assert_eq!(&loaded.session_id, controller.session_id());
    }

    #[test]
    fn from_app_config_attaches_sink_when_logging_enabled() {
        let app = AppConfig::default();
        let controller =
            DiagnosticController::from_app_config(Arc::new(DiagnosticConfig::standard()), &app)
                .unwrap();
        assert!(controller.dispatcher.is_some());
        assert!(controller.log_completions);
    }
}
