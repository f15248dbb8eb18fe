//! Answer value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::config::MAX_OPTION_POINTS;
use super::errors::{DiagnosticError, ValidationReason};

/// A recorded selection. Keyed by question id in the session's answer map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub answer_text: String,
    pub points: u8,
    #[serde(rename = "timestamp")]
    pub recorded_at: Timestamp,
}

impl Answer {
    /// Validates raw input and stamps the answer with the current time.
    ///
    /// # Errors
    ///
    /// - `Validation` with `EmptyQuestionId`, `EmptyAnswerText` or
    ///   `PointsOutOfRange`
    pub fn record(
        question_id: &str,
        answer_text: &str,
        points: i64,
    ) -> Result<Self, DiagnosticError> {
        if question_id.is_empty() {
            return Err(DiagnosticError::validation(ValidationReason::EmptyQuestionId));
        }
        if answer_text.is_empty() {
            return Err(DiagnosticError::validation(ValidationReason::EmptyAnswerText));
        }
        let points = u8::try_from(points)
            .ok()
            .filter(|points| *points <= MAX_OPTION_POINTS)
            .ok_or_else(|| {
                DiagnosticError::validation(ValidationReason::PointsOutOfRange(points))
            })?;

        Ok(Self {
            answer_text: answer_text.to_string(),
            points,
            recorded_at: Timestamp::now(),
        })
    }
}
