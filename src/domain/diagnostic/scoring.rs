//! Scoring engine - point lookups and score totals.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::config::DiagnosticConfig;
use super::errors::DiagnosticError;

/// Highest total a complete answer set can reach (5 questions x 2 points).
pub const MAX_SCORE: u32 = 10;

/// Stateless scorer over an immutable questionnaire.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: Arc<DiagnosticConfig>,
}

impl ScoringEngine {
    pub fn new(config: Arc<DiagnosticConfig>) -> Self {
        Self { config }
    }

    /// Points for the option whose text matches `option_text` exactly.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` if no question has `question_id`
    /// - `OptionNotFound` if the question has no option with that text
    pub fn points_for(&self, question_id: &str, option_text: &str) -> Result<u8, DiagnosticError> {
        let question =
            self.config
                .question(question_id)
                .ok_or_else(|| DiagnosticError::QuestionNotFound {
                    question_id: question_id.to_string(),
                })?;

        question
            .option(option_text)
            .map(|option| option.points)
            .ok_or_else(|| DiagnosticError::OptionNotFound {
                question_id: question_id.to_string(),
                option_text: option_text.to_string(),
            })
    }

    /// Sums the points. The key set is not checked; an empty map scores 0.
    pub fn total_score(&self, points_by_question: &BTreeMap<String, u8>) -> u32 {
        points_by_question.values().map(|points| u32::from(*points)).sum()
    }

    /// True iff `score` lies in [0, 10].
    pub fn is_valid_score(&self, score: i64) -> bool {
        (0..=i64::from(MAX_SCORE)).contains(&score)
    }
}
