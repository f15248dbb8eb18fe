//! DiagnosticSession aggregate.
//!
//! Owns the screen state, the answer map and the cached score and
//! recommendation for one run through the questionnaire.
//!
//! # Invariants
//!
//! - screen transitions follow [`DiagnosticState`]'s state machine, except
//!   [`DiagnosticSession::show_recommendation`] which may jump from anywhere
//! - answers can be recorded on any screen
//! - recording an answer drops the cached score and recommendation; both
//!   are recomputed on the next read
//! - a failed operation leaves the session unchanged

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::foundation::{SessionId, StateMachine, Timestamp};

use super::answer::Answer;
use super::assessment::{assess, AssessmentArea};
use super::config::{DiagnosticConfig, Question};
use super::errors::DiagnosticError;
use super::events::{BookingHandoff, StateChange};
use super::log_payload::DiagnosticLogPayload;
use super::recommendation::{Recommendation, RecommendationEngine};
use super::scoring::ScoringEngine;
use super::snapshot::SessionSnapshot;
use super::state::DiagnosticState;

/// One diagnostic run.
#[derive(Debug, Clone)]
pub struct DiagnosticSession {
    id: SessionId,
    started_at: Timestamp,
    state: DiagnosticState,
    answers: BTreeMap<String, Answer>,
    score: Option<u32>,
    recommendation: Option<Recommendation>,
    config: Arc<DiagnosticConfig>,
    scoring: ScoringEngine,
    recommender: RecommendationEngine,
}

impl DiagnosticSession {
    /// Fresh session on the intro screen with a new id.
    pub fn new(config: Arc<DiagnosticConfig>) -> Self {
        Self {
            id: SessionId::new(),
            started_at: Timestamp::now(),
            state: DiagnosticState::Intro,
            answers: BTreeMap::new(),
            score: None,
            recommendation: None,
            scoring: ScoringEngine::new(Arc::clone(&config)),
            recommender: RecommendationEngine::new(Arc::clone(&config)),
            config,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn state(&self) -> DiagnosticState {
        self.state
    }

    pub fn answers(&self) -> &BTreeMap<String, Answer> {
        &self.answers
    }

    pub fn answer(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// Cached score, if computed since the last answer change.
    pub fn score(&self) -> Option<u32> {
        self.score
    }

    /// Cached recommendation, if computed since the last answer change.
    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.recommendation.as_ref()
    }

    pub fn config(&self) -> &Arc<DiagnosticConfig> {
        &self.config
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    /// True once every configured question has an answer.
    pub fn is_complete(&self) -> bool {
        self.config
            .question_ids()
            .all(|id| self.answers.contains_key(id))
    }

    /// Question for the screen currently shown, `None` off question screens.
    pub fn current_question(&self) -> Option<&Question> {
        self.state
            .question_number()
            .and_then(|number| self.config.question_at(number))
    }

    /// Question id → points for every recorded answer.
    pub fn points_by_question(&self) -> BTreeMap<String, u8> {
        self.answers
            .iter()
            .map(|(id, answer)| (id.clone(), answer.points))
            .collect()
    }

    /// Per-area status for every answered question, in questionnaire order.
    pub fn transparency(&self) -> Vec<AssessmentArea> {
        assess(&self.config, &self.answers)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Intro → first question.
    ///
    /// # Errors
    ///
    /// - `IllegalTransition` from any screen other than the intro
    pub fn start(&mut self) -> Result<StateChange, DiagnosticError> {
        if self.state != DiagnosticState::Intro {
            return Err(DiagnosticError::illegal_transition(self.state, "start"));
        }
        self.move_to(DiagnosticState::Question1, "start")
    }

    /// Upserts the answer for `question_id`, replacing any earlier one.
    ///
    /// Allowed on every screen. Drops the cached score and recommendation.
    ///
    /// # Errors
    ///
    /// - `Validation` for an empty id or text, or points outside [0, 2]
    pub fn record_answer(
        &mut self,
        question_id: &str,
        answer_text: &str,
        points: i64,
    ) -> Result<&Answer, DiagnosticError> {
        let answer = Answer::record(question_id, answer_text, points)?;
        self.score = None;
        self.recommendation = None;

        let slot = match self.answers.entry(question_id.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(answer);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(answer),
        };
        Ok(slot)
    }

    /// Advances one question screen. Leaving the last question computes the
    /// score and recommendation before landing on the recommendation screen.
    ///
    /// # Errors
    ///
    /// - `IllegalTransition` when not on a question screen
    /// - `InvalidScore` if the recorded answers sum past 10
    pub fn next_question(&mut self) -> Result<StateChange, DiagnosticError> {
        const ACTION: &str = "advance to next question";

        let next = self
            .state
            .next()
            .filter(|_| self.state.is_question())
            .ok_or_else(|| DiagnosticError::illegal_transition(self.state, ACTION))?;

        if next == DiagnosticState::Recommendation {
            self.ensure_recommendation()?;
        }
        self.move_to(next, ACTION)
    }

    /// Sums the recorded answers, reusing the cached total when present.
    /// Partial answer sets give partial sums. Totals outside 0..=10 are
    /// returned but never cached.
    pub fn calculate_score(&mut self) -> u32 {
        if let Some(score) = self.score {
            return score;
        }
        let score = self.scoring.total_score(&self.points_by_question());
        if self.scoring.is_valid_score(i64::from(score)) {
            self.score = Some(score);
        }
        score
    }

    /// Computes score and recommendation as needed, then jumps to the
    /// recommendation screen from wherever the session is.
    ///
    /// # Errors
    ///
    /// - `InvalidScore` if the recorded answers sum past 10
    /// - `UnknownCategory` if the configuration lacks copy for the category
    pub fn show_recommendation(&mut self) -> Result<StateChange, DiagnosticError> {
        self.ensure_recommendation()?;
        let change = StateChange::new(self.state, DiagnosticState::Recommendation);
        self.state = DiagnosticState::Recommendation;
        Ok(change)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Outputs
    // ─────────────────────────────────────────────────────────────────────────

    /// Copy of the session for persistence, stamped with `ended_at`.
    pub fn snapshot(&self, ended_at: Timestamp) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            start_time: self.started_at,
            end_time: ended_at,
            answers: self.answers.clone(),
            score: self.score,
            recommendation: self.recommendation.clone(),
        }
    }

    /// Analytics payload, available once a recommendation exists.
    pub fn log_payload(&self, at: Timestamp) -> Option<DiagnosticLogPayload> {
        let score = self.score?;
        let recommendation = self.recommendation.as_ref()?;
        Some(DiagnosticLogPayload::new(
            &self.answers,
            score,
            recommendation.category,
            at,
        ))
    }

    /// Attribution for the booking widget.
    ///
    /// # Errors
    ///
    /// - `IllegalTransition` if no recommendation has been computed
    pub fn booking_handoff(&self, at: Timestamp) -> Result<BookingHandoff, DiagnosticError> {
        let recommendation = self
            .recommendation
            .as_ref()
            .ok_or_else(|| DiagnosticError::illegal_transition(self.state, "request booking"))?;

        Ok(BookingHandoff {
            session_id: self.id,
            category: recommendation.category,
            requested_at: at,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_recommendation(&mut self) -> Result<&Recommendation, DiagnosticError> {
        let recommendation = match self.recommendation.take() {
            Some(cached) => cached,
            None => {
                let score = self
                    .score
                    .unwrap_or_else(|| self.scoring.total_score(&self.points_by_question()));
                let recommendation = self.recommender.recommendation_for(i64::from(score))?;
                self.score = Some(score);
                recommendation
            }
        };
        Ok(self.recommendation.insert(recommendation))
    }

    fn move_to(
        &mut self,
        target: DiagnosticState,
        action: &'static str,
    ) -> Result<StateChange, DiagnosticError> {
        let next = self
            .state
            .transition_to(target)
            .map_err(|_| DiagnosticError::illegal_transition(self.state, action))?;
        let change = StateChange::new(self.state, next);
        self.state = next;
        Ok(change)
    }
}
