//! Recommendation engine - maps a total score to one of four fixed tiers.
//!
//! The score domain [0, 10] is partitioned into contiguous ranges:
//!
//! | Score  | Category                      |
//! |--------|-------------------------------|
//! | 0      | `FULLY_READY`                 |
//! | 1-2    | `OPTIONAL_CONFIRMATION`       |
//! | 3-6    | `REVIEW_BENEFICIAL`           |
//! | 7-10   | `REVIEW_STRONGLY_RECOMMENDED` |
//!
//! The ranges live in code; the copy shown for each tier comes from the
//! injected [`DiagnosticConfig`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use super::config::DiagnosticConfig;
use super::errors::DiagnosticError;
use super::scoring::MAX_SCORE;

/// Recommendation tier driving the call-to-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationCategory {
    FullyReady,
    OptionalConfirmation,
    ReviewBeneficial,
    ReviewStronglyRecommended,
}

impl RecommendationCategory {
    /// All categories in ascending score order.
    pub const ALL: [RecommendationCategory; 4] = [
        RecommendationCategory::FullyReady,
        RecommendationCategory::OptionalConfirmation,
        RecommendationCategory::ReviewBeneficial,
        RecommendationCategory::ReviewStronglyRecommended,
    ];

    /// Inclusive score range this category covers.
    pub fn score_range(&self) -> RangeInclusive<u32> {
        match self {
            RecommendationCategory::FullyReady => 0..=0,
            RecommendationCategory::OptionalConfirmation => 1..=2,
            RecommendationCategory::ReviewBeneficial => 3..=6,
            RecommendationCategory::ReviewStronglyRecommended => 7..=MAX_SCORE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationCategory::FullyReady => "FULLY_READY",
            RecommendationCategory::OptionalConfirmation => "OPTIONAL_CONFIRMATION",
            RecommendationCategory::ReviewBeneficial => "REVIEW_BENEFICIAL",
            RecommendationCategory::ReviewStronglyRecommended => "REVIEW_STRONGLY_RECOMMENDED",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Voice the recommendation copy is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Objective,
    Serious,
}

/// Full recommendation record shown on the results screen and persisted
/// with the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub score: u32,
    pub message: String,
    pub color: String,
    pub icon: String,
    pub cta_text: String,
    pub cta_optional: bool,
    pub tone: Tone,
}

/// Stateless mapping from score to recommendation.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    config: Arc<DiagnosticConfig>,
}

impl RecommendationEngine {
    pub fn new(config: Arc<DiagnosticConfig>) -> Self {
        Self { config }
    }

    /// Returns the category whose range contains `score`.
    ///
    /// # Errors
    ///
    /// - `InvalidScore` if `score` is outside [0, 10]
    pub fn category_for(&self, score: i64) -> Result<RecommendationCategory, DiagnosticError> {
        let in_domain = u32::try_from(score)
            .ok()
            .filter(|score| *score <= MAX_SCORE)
            .ok_or(DiagnosticError::InvalidScore { score })?;

        RecommendationCategory::ALL
            .into_iter()
            .find(|category| category.score_range().contains(&in_domain))
            .ok_or(DiagnosticError::InvalidScore { score })
    }

    /// Builds the full recommendation record for `score`.
    ///
    /// # Errors
    ///
    /// - `InvalidScore` if `score` is outside [0, 10]
    /// - `UnknownCategory` if the configuration has no copy for the category
    pub fn recommendation_for(&self, score: i64) -> Result<Recommendation, DiagnosticError> {
        let category = self.category_for(score)?;
        let profile = self.config.recommendation_profile(category).ok_or_else(|| {
            DiagnosticError::UnknownCategory {
                category: category.to_string(),
            }
        })?;

        Ok(Recommendation {
            category,
            score: score as u32,
            message: profile.message.clone(),
            color: profile.color.clone(),
            icon: profile.icon.clone(),
            cta_text: profile.cta_text.clone(),
            cta_optional: profile.cta_optional,
            tone: profile.tone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn engine() -> RecommendationEngine {
        RecommendationEngine::new(Arc::new(DiagnosticConfig::standard()))
    }

    #[test]
    fn ranges_partition_the_score_domain() {
        for score in 0..=MAX_SCORE {
            let owners = RecommendationCategory::ALL
                .iter()
                .filter(|category| category.score_range().contains(&score))
                .count();
            assert_eq!(owners, 1, "score {} covered {} times", score, owners);
        }
    }

    #[test]
    fn zero_is_fully_ready() {
        assert_eq!(
            engine().category_for(0).unwrap(),
            RecommendationCategory::FullyReady
        );
    }

    #[test]
    fn two_and_three_fall_on_opposite_sides_of_a_boundary() {
        let engine = engine();
        assert_eq!(
            engine.category_for(2).unwrap(),
            RecommendationCategory::OptionalConfirmation
        );
        assert_eq!(
            engine.category_for(3).unwrap(),
            RecommendationCategory::ReviewBeneficial
        );
    }

    #[test]
    fn six_and_seven_fall_on_opposite_sides_of_a_boundary() {
        let engine = engine();
        assert_eq!(
            engine.category_for(6).unwrap(),
            RecommendationCategory::ReviewBeneficial
        );
        assert_eq!(
            engine.category_for(7).unwrap(),
            RecommendationCategory::ReviewStronglyRecommended
        );
    }

    #[test]
    fn out_of_domain_scores_are_rejected() {
        let engine = engine();
        assert_eq!(
            engine.category_for(-1),
            Err(DiagnosticError::InvalidScore { score: -1 })
        );
        assert_eq!(
            engine.category_for(11),
            Err(DiagnosticError::InvalidScore { score: 11 })
        );
    }

    #[test]
    fn recommendation_carries_profile_copy() {
        let rec = engine().recommendation_for(8).unwrap();
        assert_eq!(rec.category, RecommendationCategory::ReviewStronglyRecommended);
        assert_eq!(rec.score, 8);
        assert_eq!(rec.color, "#dc2626");
        assert_eq!(rec.icon, "x-circle");
        assert_eq!(rec.tone, Tone::Serious);
        assert!(!rec.cta_optional);
    }

    #[test]
    fn only_fully_ready_has_optional_cta() {
        let engine = engine();
        assert!(engine.recommendation_for(0).unwrap().cta_optional);
        for score in 1..=10 {
            assert!(!engine.recommendation_for(score).unwrap().cta_optional);
        }
    }

    #[test]
    fn missing_profile_is_unknown_category() {
        let standard = DiagnosticConfig::standard();
        let config = DiagnosticConfig::new(standard.questions().to_vec(), vec![], BTreeMap::new());
        let engine = RecommendationEngine::new(Arc::new(config));
        assert_eq!(
            engine.recommendation_for(4),
            Err(DiagnosticError::UnknownCategory {
                category: "REVIEW_BENEFICIAL".to_string()
            })
        );
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(engine().recommendation_for(1).unwrap()).unwrap();
        assert_eq!(json["category"], "OPTIONAL_CONFIRMATION");
        assert_eq!(json["ctaText"], "Book Claim Readiness Review");
        assert_eq!(json["ctaOptional"], false);
        assert_eq!(json["tone"], "objective");
    }

    proptest! {
        #[test]
        fn category_for_is_total_over_domain(score in 0i64..=10) {
            let category = engine().category_for(score).unwrap();
            prop_assert!(category.score_range().contains(&(score as u32)));
        }

        #[test]
        fn category_for_rejects_everything_else(score in prop_oneof![i64::MIN..0i64, 11i64..i64::MAX]) {
            prop_assert!(engine().category_for(score).is_err());
        }
    }
}
