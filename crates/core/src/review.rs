//! Review status vocabulary, score constraints, and submission validation.
//!
//! Status path: `pending -> approved` or `pending -> rejected`. A rejected
//! review is resubmittable: the reviewer revises it in place, which moves it
//! back to `pending` (the only backward move, and only via that explicit
//! path). Reviews are never deleted.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Review has been submitted and awaits a manager decision.
pub const REVIEW_STATUS_PENDING: &str = "pending";

/// Review was approved; its scores count toward approved-only aggregates.
pub const REVIEW_STATUS_APPROVED: &str = "approved";

/// Review was sent back for revision.
pub const REVIEW_STATUS_REJECTED: &str = "rejected";

/// All valid review status values.
pub const VALID_REVIEW_STATUSES: &[&str] = &[
    REVIEW_STATUS_PENDING,
    REVIEW_STATUS_APPROVED,
    REVIEW_STATUS_REJECTED,
];

pub const DECISION_APPROVE: &str = "approve";
pub const DECISION_REJECT: &str = "reject";

/// All valid decision values for [`validate_decision`].
pub const VALID_DECISIONS: &[&str] = &[DECISION_APPROVE, DECISION_REJECT];

/// Inclusive lower bound for every score.
pub const SCORE_MIN: f64 = 1.0;

/// Inclusive upper bound for every score.
pub const SCORE_MAX: f64 = 5.0;

/// The four numeric dimensions of a review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub performance: f64,
    pub leadership: f64,
    pub teamwork: f64,
    pub innovation: f64,
}

impl ScoreSet {
    fn iter_named(&self) -> [(&'static str, f64); 4] {
        [
            ("performance", self.performance),
            ("leadership", self.leadership),
            ("teamwork", self.teamwork),
            ("innovation", self.innovation),
        ]
    }
}

/// Validate that every score lies in `[SCORE_MIN, SCORE_MAX]` and is finite.
pub fn validate_scores(scores: &ScoreSet) -> Result<(), CoreError> {
    for (name, value) in scores.iter_named() {
        if !value.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&value) {
            return Err(CoreError::Validation(format!(
                "{name} score {value} is outside the valid range [{SCORE_MIN}, {SCORE_MAX}]"
            )));
        }
    }
    Ok(())
}

/// Validate the qualitative fields of a submission.
///
/// Strengths and areas-for-improvement are mandatory; training
/// recommendations are optional.
pub fn validate_feedback(strengths: &str, areas_for_improvement: &str) -> Result<(), CoreError> {
    if strengths.trim().is_empty() {
        return Err(CoreError::Validation(
            "Strengths must not be empty".to_string(),
        ));
    }
    if areas_for_improvement.trim().is_empty() {
        return Err(CoreError::Validation(
            "Areas for improvement must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate that a decision string is one of the accepted values.
pub fn validate_decision(decision: &str) -> Result<(), CoreError> {
    if VALID_DECISIONS.contains(&decision) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid decision '{decision}'. Must be one of: {}",
            VALID_DECISIONS.join(", ")
        )))
    }
}

/// Check that a review in `current` status can still be decided.
pub fn ensure_decidable(current: &str) -> Result<(), CoreError> {
    if current == REVIEW_STATUS_PENDING {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition(format!(
            "Review in status '{current}' cannot be decided; only '{REVIEW_STATUS_PENDING}' reviews can"
        )))
    }
}

/// Check whether an existing review for the triple blocks a new submission.
///
/// Only a rejected review may be resubmitted; any other existing review is
/// a duplicate.
pub fn ensure_resubmittable(existing_status: &str) -> Result<(), CoreError> {
    if existing_status == REVIEW_STATUS_REJECTED {
        Ok(())
    } else {
        Err(CoreError::DuplicateReview(format!(
            "A review for this reviewer and reviewee already exists in this cycle (status '{existing_status}')"
        )))
    }
}
