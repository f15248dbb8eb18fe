//! DiagnosticState enum for the screen the quiz is showing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Number of question screens between the intro and the recommendation.
pub const QUESTION_COUNT: usize = 5;

/// Screen the diagnostic is currently on.
///
/// `Transparency` is a legacy screen kept so older persisted values still
/// parse. No transition targets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticState {
    #[default]
    Intro,
    #[serde(rename = "question_1")]
    Question1,
    #[serde(rename = "question_2")]
    Question2,
    #[serde(rename = "question_3")]
    Question3,
    #[serde(rename = "question_4")]
    Question4,
    #[serde(rename = "question_5")]
    Question5,
    Recommendation,
    Transparency,
}

impl DiagnosticState {
    /// Question screens in presentation order.
    pub const QUESTIONS: [DiagnosticState; QUESTION_COUNT] = [
        DiagnosticState::Question1,
        DiagnosticState::Question2,
        DiagnosticState::Question3,
        DiagnosticState::Question4,
        DiagnosticState::Question5,
    ];

    /// Returns the 1-based question number for question screens.
    pub fn question_number(&self) -> Option<usize> {
        Self::QUESTIONS
            .iter()
            .position(|state| state == self)
            .map(|index| index + 1)
    }

    /// Returns the question screen for a 1-based number.
    pub fn for_question(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::QUESTIONS.get(index))
            .copied()
    }

    pub fn is_question(&self) -> bool {
        self.question_number().is_some()
    }

    /// Screen reached by `next_question` from here, if any.
    pub fn next(&self) -> Option<Self> {
        match self.question_number() {
            Some(QUESTION_COUNT) => Some(DiagnosticState::Recommendation),
            Some(number) => Self::for_question(number + 1),
            None => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticState::Intro => "intro",
            DiagnosticState::Question1 => "question_1",
            DiagnosticState::Question2 => "question_2",
            DiagnosticState::Question3 => "question_3",
            DiagnosticState::Question4 => "question_4",
            DiagnosticState::Question5 => "question_5",
            DiagnosticState::Recommendation => "recommendation",
            DiagnosticState::Transparency => "transparency",
        }
    }
}

impl StateMachine for DiagnosticState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DiagnosticState::*;
        matches!(
            (self, target),
            (Intro, Question1)
                | (Question1, Question2)
                | (Question2, Question3)
                | (Question3, Question4)
                | (Question4, Question5)
                | (Question5, Recommendation)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            DiagnosticState::Intro => vec![DiagnosticState::Question1],
            state => state.next().into_iter().collect(),
        }
    }
}

impl fmt::Display for DiagnosticState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
