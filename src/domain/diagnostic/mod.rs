//! Claim readiness diagnostic.
//!
//! Five questions, each answered with 0-2 points, summed into a score in
//! [0, 10] that selects one of four recommendation tiers.
//!
//! # Module Organization
//!
//! - `config` - Questionnaire content injected into the engines
//! - `state` - Screen state machine
//! - `scoring` / `recommendation` - Pure engines over the configuration
//! - `session` - Aggregate owning answers, cached score and recommendation
//! - `snapshot` / `log_payload` - Persisted and analytics representations

mod answer;
mod assessment;
mod config;
mod errors;
mod events;
mod log_payload;
mod recommendation;
mod scoring;
mod session;
mod snapshot;
mod state;

pub use answer::Answer;
pub use assessment::{assess, AssessmentArea, StatusIndicator};
pub use config::{
    AnswerOption, ConfigLoadError, DiagnosticConfig, Question, RecommendationProfile,
    MAX_OPTION_POINTS, OPTIONS_PER_QUESTION,
};
pub use errors::{DiagnosticError, ValidationReason};
pub use events::{BookingHandoff, StateChange};
pub use log_payload::{validate_payload, DiagnosticLogPayload, PayloadError};
pub use recommendation::{Recommendation, RecommendationCategory, RecommendationEngine, Tone};
pub use scoring::{ScoringEngine, MAX_SCORE};
pub use session::DiagnosticSession;
pub use snapshot::SessionSnapshot;
pub use state::{DiagnosticState, QUESTION_COUNT};
