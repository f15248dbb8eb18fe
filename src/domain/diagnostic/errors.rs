//! Diagnostic-specific error types.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

use super::DiagnosticState;

/// Why an answer was rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    EmptyQuestionId,
    EmptyAnswerText,
    PointsOutOfRange(i64),
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationReason::EmptyQuestionId => write!(f, "question id must not be empty"),
            ValidationReason::EmptyAnswerText => write!(f, "answer text must not be empty"),
            ValidationReason::PointsOutOfRange(points) => {
                write!(f, "points must be between 0 and 2, got {}", points)
            }
        }
    }
}

/// Errors raised by the diagnostic engines, state machine and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticError {
    #[error("Invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: ValidationReason,
    },

    #[error("Cannot {action} from state {from}")]
    IllegalTransition {
        from: DiagnosticState,
        action: &'static str,
    },

    #[error("Question not found: {question_id}")]
    QuestionNotFound { question_id: String },

    #[error("Answer option not found: {option_text} for question {question_id}")]
    OptionNotFound {
        question_id: String,
        option_text: String,
    },

    #[error("Invalid score: {score}. Score must be between 0 and 10.")]
    InvalidScore { score: i64 },

    #[error("No recommendation configured for category {category}")]
    UnknownCategory { category: String },

    #[error("Session storage is not available: {reason}")]
    StorageUnavailable { reason: String },

    #[error("Failed to save session: {reason}")]
    StorageQuota { reason: String },
}

impl DiagnosticError {
    pub fn validation(reason: ValidationReason) -> Self {
        let field = match reason {
            ValidationReason::EmptyQuestionId => "question_id",
            ValidationReason::EmptyAnswerText => "answer_text",
            ValidationReason::PointsOutOfRange(_) => "points",
        };
        DiagnosticError::Validation { field, reason }
    }

    pub fn illegal_transition(from: DiagnosticState, action: &'static str) -> Self {
        DiagnosticError::IllegalTransition { from, action }
    }

    pub fn storage_unavailable(reason: impl Into<String>) -> Self {
        DiagnosticError::StorageUnavailable {
            reason: reason.into(),
        }
    }

    /// Machine-readable kind for the rendering layer.
    pub fn code(&self) -> ErrorCode {
        match self {
            DiagnosticError::Validation { .. } => ErrorCode::ValidationFailed,
            DiagnosticError::IllegalTransition { .. } => ErrorCode::IllegalTransition,
            DiagnosticError::QuestionNotFound { .. } => ErrorCode::QuestionNotFound,
            DiagnosticError::OptionNotFound { .. } => ErrorCode::OptionNotFound,
            DiagnosticError::InvalidScore { .. } => ErrorCode::InvalidScore,
            DiagnosticError::UnknownCategory { .. } => ErrorCode::UnknownCategory,
            DiagnosticError::StorageUnavailable { .. } => ErrorCode::StorageUnavailable,
            DiagnosticError::StorageQuota { .. } => ErrorCode::StorageQuotaExceeded,
        }
    }

    /// True when the quiz can carry on: bad input gets re-prompted and a
    /// storage failure only costs persistence. Transition misuse and lookup
    /// failures point at wiring or configuration bugs.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DiagnosticError::Validation { .. }
                | DiagnosticError::StorageUnavailable { .. }
                | DiagnosticError::StorageQuota { .. }
        )
    }
}
