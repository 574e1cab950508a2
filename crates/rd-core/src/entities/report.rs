use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Lowest accepted rating.
pub const MIN_RATING: i32 = 1;
/// Highest accepted rating.
pub const MAX_RATING: i32 = 5;

/// The four consultant ratings of an evaluation report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportScores {
    pub overall_rating: i32,
    pub quality_rating: i32,
    pub timeliness_rating: i32,
    pub communication_rating: i32,
}

impl ReportScores {
    /// Every score must be an integer in `[1, 5]`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first out-of-range score.
    pub fn validate(&self) -> Result<(), CoreError> {
        let named = [
            ("overall_rating", self.overall_rating),
            ("quality_rating", self.quality_rating),
            ("timeliness_rating", self.timeliness_rating),
            ("communication_rating", self.communication_rating),
        ];
        for (field, value) in named {
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(CoreError::Validation(format!(
                    "{field} must be between {MIN_RATING} and {MAX_RATING}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Free-text sections of an evaluation report. All optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportTexts {
    #[serde(default)]
    pub strengths: Option<String>,
    #[serde(default)]
    pub areas_for_improvement: Option<String>,
    #[serde(default)]
    pub recommendations: Option<String>,
    #[serde(default)]
    pub general_feedback: Option<String>,
}

/// A consultant's one-time assessment of a company within a sub-project.
///
/// Immutable once stored; at most one exists per (sub-project, company).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvaluationReport {
    pub id: String,
    pub sub_project_id: String,
    pub company_id: String,
    #[serde(flatten)]
    pub scores: ReportScores,
    #[serde(flatten)]
    pub texts: ReportTexts,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scores(overall: i32) -> ReportScores {
        ReportScores {
            overall_rating: overall,
            quality_rating: 3,
            timeliness_rating: 3,
            communication_rating: 3,
        }
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn in_range_scores_pass(#[case] overall: i32) {
        assert!(scores(overall).validate().is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    fn out_of_range_scores_fail(#[case] overall: i32) {
        let err = scores(overall).validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref msg) if msg.contains("overall_rating")));
    }

    #[test]
    fn validation_names_the_offending_field() {
        let s = ReportScores {
            overall_rating: 4,
            quality_rating: 4,
            timeliness_rating: 9,
            communication_rating: 4,
        };
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("timeliness_rating"));
    }
}
