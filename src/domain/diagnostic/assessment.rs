//! Transparency breakdown: how each assessment area scored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::answer::Answer;
use super::config::DiagnosticConfig;

/// Status shown next to an assessment area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusIndicator {
    Adequate,
    NeedsAttention,
    Missing,
}

impl StatusIndicator {
    /// 0 → adequate, 1 → needs attention, 2 → missing.
    pub fn from_points(points: u8) -> Option<Self> {
        match points {
            0 => Some(StatusIndicator::Adequate),
            1 => Some(StatusIndicator::NeedsAttention),
            2 => Some(StatusIndicator::Missing),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StatusIndicator::Adequate => "check-circle",
            StatusIndicator::NeedsAttention => "alert-circle",
            StatusIndicator::Missing => "x-circle",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusIndicator::Adequate => "Adequate",
            StatusIndicator::NeedsAttention => "Needs attention",
            StatusIndicator::Missing => "Missing",
        }
    }
}

/// One row of the transparency breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentArea {
    pub question_id: String,
    pub label: String,
    pub points: u8,
    pub status: StatusIndicator,
}

/// Builds the breakdown for answered questions, in questionnaire order.
///
/// Answers to ids the questionnaire does not know are left out.
pub fn assess(config: &DiagnosticConfig, answers: &BTreeMap<String, Answer>) -> Vec<AssessmentArea> {
    config
        .questions()
        .iter()
        .filter_map(|question| {
            let answer = answers.get(&question.id)?;
            let status = StatusIndicator::from_points(answer.points)?;
            let label = config
                .assessment_label(&question.id)
                .unwrap_or(question.id.as_str())
                .to_string();
            Some(AssessmentArea {
                question_id: question.id.clone(),
                label,
                points: answer.points,
                status,
            })
        })
        .collect()
}
