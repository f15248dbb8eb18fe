//! Static diagnostic content: questions, recommendation copy and
//! assessment-area labels.
//!
//! The content is an immutable value handed to the engines at construction.
//! [`DiagnosticConfig::standard`] builds the production questionnaire;
//! [`DiagnosticConfig::from_yaml_str`] loads an alternate one.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use crate::domain::foundation::ValidationError;

use super::recommendation::{RecommendationCategory, Tone};
use super::state::QUESTION_COUNT;

/// Options every question offers.
pub const OPTIONS_PER_QUESTION: usize = 3;

/// Highest point value a single option can carry.
pub const MAX_OPTION_POINTS: u8 = 2;

/// One selectable answer, in the order it is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub points: u8,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>, points: u8) -> Self {
        Self {
            text: text.into(),
            points,
        }
    }
}

/// One of the five diagnostic questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub number: usize,
    pub title: String,
    #[serde(default)]
    pub helper: String,
    #[serde(default)]
    pub category: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Finds an option by exact display text.
    pub fn option(&self, text: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.text == text)
    }
}

/// Copy and styling shown for a recommendation category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationProfile {
    pub category: RecommendationCategory,
    pub message: String,
    pub color: String,
    pub icon: String,
    pub cta_text: String,
    pub cta_optional: bool,
    pub tone: Tone,
}

/// Errors loading an alternate questionnaire.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Failed to parse diagnostic configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid diagnostic configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// Complete, immutable questionnaire definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticConfig {
    questions: Vec<Question>,
    recommendations: Vec<RecommendationProfile>,
    #[serde(default)]
    assessment_areas: BTreeMap<String, String>,
}

impl DiagnosticConfig {
    /// Assembles a configuration without validating it.
    ///
    /// Call [`validate`](Self::validate) before use unless the content is
    /// known-good; the engines report missing entries as errors.
    pub fn new(
        questions: Vec<Question>,
        recommendations: Vec<RecommendationProfile>,
        assessment_areas: BTreeMap<String, String>,
    ) -> Self {
        Self {
            questions,
            recommendations,
            assessment_areas,
        }
    }

    /// Parses and validates a YAML questionnaire.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: DiagnosticConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// The production Claim Readiness questionnaire.
    pub fn standard() -> Self {
        let questions = vec![
            standard_question(
                "service_connection",
                1,
                "Are you confident the VA can clearly see how your condition is connected to service?",
                "A diagnosis alone isn't enough. The VA looks for specific medical or service evidence linking the condition to your time in service.",
                "Service Connection",
                [
                    "No — the connection is not clearly shown",
                    "Somewhat — parts are there, but I'm not fully sure",
                    "Yes — the connection is clearly documented",
                ],
            ),
            standard_question(
                "denial_handling",
                2,
                "If you were denied before, do you fully understand (and have you fixed) the actual reason for denial?",
                "Many veterans later realize they were fixing the wrong issue because denial letters are easy to misunderstand.",
                "Denial Handling",
                [
                    "No — I'm not sure what the reason was",
                    "Somewhat — I think I understand but I'm not certain",
                    "Yes — I understand and have addressed it",
                ],
            ),
            standard_question(
                "pathway",
                3,
                "Are you certain you're filing under the correct claim type for your situation?",
                "Filing a new, supplemental, or increase claim under the wrong path can delay or derail a claim.",
                "Claim Pathway",
                [
                    "No — I'm not sure which type applies",
                    "Somewhat — I think I know but I'm not certain",
                    "Yes — I'm certain of the correct pathway",
                ],
            ),
            standard_question(
                "severity",
                4,
                "Is your medical evidence detailed enough to support the rating level you're seeking?",
                "The VA rates based on documented severity, frequency, and functional impact, not just a diagnosis.",
                "Medical Evidence",
                [
                    "No — my evidence is minimal or vague",
                    "Somewhat — I have some details but could be more thorough",
                    "Yes — my evidence is detailed and comprehensive",
                ],
            ),
            standard_question(
                "secondaries",
                5,
                "Have you identified all conditions caused or worsened by your service-connected issues?",
                "Secondary conditions are often missed and discovered only after a denial or low rating.",
                "Secondary Conditions",
                [
                    "No — I haven't considered secondary conditions",
                    "Somewhat — I've identified some but may have missed others",
                    "Yes — I've identified all related conditions",
                ],
            ),
        ];

        let recommendations = vec![
            RecommendationProfile {
                category: RecommendationCategory::FullyReady,
                message: "Your claim is FULLY READY. No Claim Readiness Review is needed".into(),
                color: "#10b981".into(),
                icon: "check-circle".into(),
                cta_text: "Book review for peace of mind".into(),
                cta_optional: true,
                tone: Tone::Objective,
            },
            RecommendationProfile {
                category: RecommendationCategory::OptionalConfirmation,
                message: "Your claim looks strong. A Claim Readiness Review is OPTIONAL for confirmation"
                    .into(),
                color: "#3b82f6".into(),
                icon: "check".into(),
                cta_text: "Book Claim Readiness Review".into(),
                cta_optional: false,
                tone: Tone::Objective,
            },
            RecommendationProfile {
                category: RecommendationCategory::ReviewBeneficial,
                message: "Your claim would BENEFIT from a Claim Readiness Review before filing"
                    .into(),
                color: "#f59e0b".into(),
                icon: "alert-triangle".into(),
                cta_text: "Book Claim Readiness Review".into(),
                cta_optional: false,
                tone: Tone::Objective,
            },
            RecommendationProfile {
                category: RecommendationCategory::ReviewStronglyRecommended,
                message: "Your claim is NOT READY. A Claim Readiness Review is STRONGLY RECOMMENDED"
                    .into(),
                color: "#dc2626".into(),
                icon: "x-circle".into(),
                cta_text: "Book Claim Readiness Review".into(),
                cta_optional: false,
                tone: Tone::Serious,
            },
        ];

        let assessment_areas = [
            ("service_connection", "Service connection clarity"),
            ("denial_handling", "Denial handling"),
            ("pathway", "Pathway selection"),
            ("severity", "Severity documentation"),
            ("secondaries", "Missing secondaries"),
        ]
        .into_iter()
        .map(|(id, label)| (id.to_string(), label.to_string()))
        .collect();

        Self::new(questions, recommendations, assessment_areas)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Questions in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Question ids in presentation order.
    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|question| question.id.as_str())
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// Question shown on the given 1-based screen number.
    pub fn question_at(&self, number: usize) -> Option<&Question> {
        self.questions.iter().find(|question| question.number == number)
    }

    pub fn recommendation_profile(
        &self,
        category: RecommendationCategory,
    ) -> Option<&RecommendationProfile> {
        self.recommendations
            .iter()
            .find(|profile| profile.category == category)
    }

    /// Label for the transparency breakdown, falling back to the question's
    /// category name.
    pub fn assessment_label(&self, question_id: &str) -> Option<&str> {
        self.assessment_areas
            .get(question_id)
            .map(String::as_str)
            .or_else(|| {
                self.question(question_id)
                    .map(|question| question.category.as_str())
            })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks the structural invariants of the questionnaire.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` when the question or option count is wrong, ids or
    ///   option texts repeat, questions are out of order, or a
    ///   recommendation category is missing or duplicated
    /// - `EmptyField` for blank ids or option texts
    /// - `OutOfRange` for option points above 2
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.questions.len() != QUESTION_COUNT {
            return Err(ValidationError::invalid_format(
                "questions",
                format!(
                    "expected {} questions, got {}",
                    QUESTION_COUNT,
                    self.questions.len()
                ),
            ));
        }

        let mut seen_ids = HashSet::new();
        for (index, question) in self.questions.iter().enumerate() {
            Self::validate_question(question)?;

            if !seen_ids.insert(question.id.as_str()) {
                return Err(ValidationError::invalid_format(
                    "questions",
                    format!("duplicate question id '{}'", question.id),
                ));
            }
            if question.number != index + 1 {
                return Err(ValidationError::invalid_format(
                    "questions",
                    format!(
                        "question '{}' has number {} but is listed at position {}",
                        question.id,
                        question.number,
                        index + 1
                    ),
                ));
            }
        }

        for category in RecommendationCategory::ALL {
            let entries = self
                .recommendations
                .iter()
                .filter(|profile| profile.category == category)
                .count();
            if entries != 1 {
                return Err(ValidationError::invalid_format(
                    "recommendations",
                    format!("expected one entry for {}, found {}", category, entries),
                ));
            }
        }

        Ok(())
    }

    fn validate_question(question: &Question) -> Result<(), ValidationError> {
        if question.id.trim().is_empty() {
            return Err(ValidationError::empty_field("question.id"));
        }
        if question.options.len() != OPTIONS_PER_QUESTION {
            return Err(ValidationError::invalid_format(
                "options",
                format!(
                    "question '{}' must have {} options, got {}",
                    question.id,
                    OPTIONS_PER_QUESTION,
                    question.options.len()
                ),
            ));
        }

        let mut seen_texts = HashSet::new();
        for option in &question.options {
            if option.text.trim().is_empty() {
                return Err(ValidationError::empty_field("option.text"));
            }
            if option.points > MAX_OPTION_POINTS {
                return Err(ValidationError::out_of_range(
                    "option.points",
                    0,
                    i64::from(MAX_OPTION_POINTS),
                    i64::from(option.points),
                ));
            }
            if !seen_texts.insert(option.text.as_str()) {
                return Err(ValidationError::invalid_format(
                    "options",
                    format!("question '{}' repeats option '{}'", question.id, option.text),
                ));
            }
        }
        Ok(())
    }
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Standard questions all offer "No" (2), "Somewhat" (1), "Yes" (0).
fn standard_question(
    id: &str,
    number: usize,
    title: &str,
    helper: &str,
    category: &str,
    [no, somewhat, yes]: [&str; 3],
) -> Question {
    Question {
        id: id.to_string(),
        number,
        title: title.to_string(),
        helper: helper.to_string(),
        category: category.to_string(),
        options: vec![
            AnswerOption::new(no, 2),
            AnswerOption::new(somewhat, 1),
            AnswerOption::new(yes, 0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml_fixture() -> String {
        let mut yaml = String::from("questions:\n");
        for (index, id) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            yaml.push_str(&format!(
                "  - id: {id}\n    number: {n}\n    title: Question {id}\n    options:\n      - {{ text: Low, points: 0 }}\n      - {{ text: Mid, points: 1 }}\n      - {{ text: High, points: 2 }}\n",
                id = id,
                n = index + 1
            ));
        }
        yaml.push_str("recommendations:\n");
        for (category, tone) in [
            ("FULLY_READY", "objective"),
            ("OPTIONAL_CONFIRMATION", "objective"),
            ("REVIEW_BENEFICIAL", "objective"),
            ("REVIEW_STRONGLY_RECOMMENDED", "serious"),
        ] {
            yaml.push_str(&format!(
                "  - category: {category}\n    message: m\n    color: '#000'\n    icon: i\n    cta_text: c\n    cta_optional: false\n    tone: {tone}\n"
            ));
        }
        yaml
    }

    #[test]
    fn standard_config_is_valid() {
        assert!(DiagnosticConfig::standard().validate().is_ok());
    }

    #[test]
    fn standard_questions_are_in_order() {
        let config = DiagnosticConfig::standard();
        let ids: Vec<&str> = config.question_ids().collect();
        assert_eq!(
            ids,
            vec!["service_connection", "denial_handling", "pathway", "severity", "secondaries"]
        );
        for number in 1..=QUESTION_COUNT {
            assert_eq!(config.question_at(number).unwrap().number, number);
        }
    }

    #[test]
    fn standard_options_score_no_somewhat_yes() {
        let config = DiagnosticConfig::standard();
        for question in config.questions() {
            let points: Vec<u8> = question.options.iter().map(|o| o.points).collect();
            assert_eq!(points, vec![2, 1, 0]);
        }
    }

    #[test]
    fn every_category_has_a_profile() {
        let config = DiagnosticConfig::standard();
        for category in RecommendationCategory::ALL {
            assert!(config.recommendation_profile(category).is_some());
        }
    }

    #[test]
    fn assessment_label_falls_back_to_category() {
        let mut config = DiagnosticConfig::standard();
        assert_eq!(
            config.assessment_label("pathway"),
            Some("Pathway selection")
        );
        config.assessment_areas.clear();
        assert_eq!(config.assessment_label("pathway"), Some("Claim Pathway"));
        assert_eq!(config.assessment_label("unknown"), None);
    }

    #[test]
    fn rejects_wrong_question_count() {
        let mut config = DiagnosticConfig::standard();
        config.questions.pop();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("expected 5 questions, got 4"));
    }

    #[test]
    fn rejects_duplicate_question_ids() {
        let mut config = DiagnosticConfig::standard();
        config.questions[1].id = config.questions[0].id.clone();
        assert!(config.validate().unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_out_of_order_numbers() {
        let mut config = DiagnosticConfig::standard();
        config.questions.swap(0, 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_points_above_two() {
        let mut config = DiagnosticConfig::standard();
        config.questions[2].options[0].points = 3;
        assert_eq!(
            config.validate().unwrap_err(),
            ValidationError::out_of_range("option.points", 0, 2, 3)
        );
    }

    #[test]
    fn rejects_wrong_option_count() {
        let mut config = DiagnosticConfig::standard();
        config.questions[4].options.pop();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_missing_recommendation_entry() {
        let mut config = DiagnosticConfig::standard();
        config
            .recommendations
            .retain(|p| p.category != RecommendationCategory::ReviewBeneficial);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("REVIEW_BENEFICIAL"));
    }

    #[test]
    fn loads_alternate_questionnaire_from_yaml() {
        let config = DiagnosticConfig::from_yaml_str(&yaml_fixture()).unwrap();
        assert_eq!(config.questions().len(), 5);
        assert_eq!(config.question("c").unwrap().option("High").unwrap().points, 2);
        assert_eq!(
            config
                .recommendation_profile(RecommendationCategory::ReviewStronglyRecommended)
                .unwrap()
                .tone,
            Tone::Serious
        );
    }

    #[test]
    fn yaml_loading_validates() {
        let yaml = yaml_fixture().replace("points: 2", "points: 1");
        // Still valid: points may repeat within a question.
        assert!(DiagnosticConfig::from_yaml_str(&yaml).is_ok());

        let yaml = yaml_fixture().replace("number: 5", "number: 6");
        assert!(matches!(
            DiagnosticConfig::from_yaml_str(&yaml),
            Err(ConfigLoadError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        assert!(matches!(
            DiagnosticConfig::from_yaml_str("questions: [oops"),
            Err(ConfigLoadError::Parse(_))
        ));
    }
}
