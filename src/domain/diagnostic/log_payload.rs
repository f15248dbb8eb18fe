//! Analytics payload sent when a diagnostic finishes, and the checks the
//! receiving endpoint applies to it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::foundation::Timestamp;

use super::answer::Answer;
use super::config::MAX_OPTION_POINTS;
use super::recommendation::RecommendationCategory;
use super::scoring::MAX_SCORE;

/// Minimal record of a finished diagnostic: points only, no answer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticLogPayload {
    /// ISO-8601 with millisecond precision.
    pub timestamp: String,
    pub answers: BTreeMap<String, u8>,
    pub score: u32,
    pub recommendation: RecommendationCategory,
}

impl DiagnosticLogPayload {
    pub fn new(
        answers: &BTreeMap<String, Answer>,
        score: u32,
        recommendation: RecommendationCategory,
        at: Timestamp,
    ) -> Self {
        Self {
            timestamp: at.to_iso_millis(),
            answers: answers
                .iter()
                .map(|(id, answer)| (id.clone(), answer.points))
                .collect(),
            score,
            recommendation,
        }
    }
}

/// Why the endpoint refused a payload. Messages are returned verbatim in
/// the `error` field of the 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("Invalid payload: Request body is empty")]
    EmptyBody,

    #[error("Invalid payload: Missing timestamp")]
    MissingTimestamp,

    #[error("Invalid payload: Missing answers")]
    MissingAnswers,

    #[error("Invalid payload: Missing score")]
    MissingScore,

    #[error("Invalid payload: Missing recommendation")]
    MissingRecommendation,

    #[error("Invalid payload: Score must be a number")]
    ScoreNotNumber,

    #[error("Invalid payload: Score must be between 0 and 10")]
    ScoreOutOfRange,

    #[error("Invalid payload: Missing answer for {0}")]
    MissingAnswer(String),

    #[error("Invalid payload: Answer {0} must be a number")]
    AnswerNotNumber(String),

    #[error("Invalid payload: Answer {0} must be between 0 and 2")]
    AnswerOutOfRange(String),
}

/// Checks an incoming JSON body field by field, in the order the errors are
/// listed on [`PayloadError`]. Every id in `required_answers` must carry
/// points in [0, 2].
pub fn validate_payload<'a>(
    body: &Value,
    required_answers: impl IntoIterator<Item = &'a str>,
) -> Result<(), PayloadError> {
    if body.is_null() {
        return Err(PayloadError::EmptyBody);
    }
    if is_blank(body.get("timestamp")) {
        return Err(PayloadError::MissingTimestamp);
    }
    if is_blank(body.get("answers")) {
        return Err(PayloadError::MissingAnswers);
    }
    let score = match body.get("score") {
        None | Some(Value::Null) => return Err(PayloadError::MissingScore),
        Some(score) => score,
    };
    if is_blank(body.get("recommendation")) {
        return Err(PayloadError::MissingRecommendation);
    }

    let score = score.as_f64().ok_or(PayloadError::ScoreNotNumber)?;
    if !(0.0..=f64::from(MAX_SCORE)).contains(&score) {
        return Err(PayloadError::ScoreOutOfRange);
    }

    let answers = &body["answers"];
    for question_id in required_answers {
        let points = match answers.get(question_id) {
            None | Some(Value::Null) => {
                return Err(PayloadError::MissingAnswer(question_id.to_string()))
            }
            Some(points) => points
                .as_f64()
                .ok_or_else(|| PayloadError::AnswerNotNumber(question_id.to_string()))?,
        };
        if !(0.0..=f64::from(MAX_OPTION_POINTS)).contains(&points) {
            return Err(PayloadError::AnswerOutOfRange(question_id.to_string()));
        }
    }

    Ok(())
}

/// Absent, null, false, zero and empty string all count as missing.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}
