//! Review entity model and DTOs.

use fullcircle_core::review::{ScoreSet, REVIEW_STATUS_APPROVED};
use fullcircle_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub review_cycle_id: DbId,
    pub reviewer_id: DbId,
    pub reviewee_id: DbId,
    pub relationship_type: String,
    pub performance_score: f64,
    pub leadership_score: f64,
    pub teamwork_score: f64,
    pub innovation_score: f64,
    pub strengths: String,
    pub areas_for_improvement: String,
    pub training_recommendations: Option<String>,
    pub status: String,
    pub submitted_at: Timestamp,
    pub approved_at: Option<Timestamp>,
}

/// DTO for submitting (or resubmitting) a review against an assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReview {
    pub performance_score: f64,
    pub leadership_score: f64,
    pub teamwork_score: f64,
    pub innovation_score: f64,
    pub strengths: String,
    pub areas_for_improvement: String,
    pub training_recommendations: Option<String>,
}

impl SubmitReview {
    /// The four scores as a core [`ScoreSet`] for validation.
    pub fn score_set(&self) -> ScoreSet {
        ScoreSet {
            performance: self.performance_score,
            leadership: self.leadership_score,
            teamwork: self.teamwork_score,
            innovation: self.innovation_score,
        }
    }
}

/// A pending review awaiting a manager decision, enriched with names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingReviewItem {
    pub id: DbId,
    pub review_cycle_id: DbId,
    pub cycle_name: String,
    pub reviewer_id: DbId,
    pub reviewer_name: String,
    pub reviewee_id: DbId,
    pub reviewee_name: String,
    pub relationship_type: String,
    pub performance_score: f64,
    pub leadership_score: f64,
    pub teamwork_score: f64,
    pub innovation_score: f64,
    pub strengths: String,
    pub areas_for_improvement: String,
    pub training_recommendations: Option<String>,
    pub submitted_at: Timestamp,
}

/// A review as seen by its reviewee.
///
/// Scores and feedback are only exposed once the review is approved; before
/// that the reviewee sees just the status (mirrors the employee dashboard
/// of the original application).
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedReview {
    pub id: DbId,
    pub review_cycle_id: DbId,
    pub relationship_type: String,
    pub status: String,
    pub performance_score: Option<f64>,
    pub leadership_score: Option<f64>,
    pub teamwork_score: Option<f64>,
    pub innovation_score: Option<f64>,
    pub strengths: Option<String>,
    pub areas_for_improvement: Option<String>,
    pub training_recommendations: Option<String>,
    pub approved_at: Option<Timestamp>,
}

impl From<Review> for ReceivedReview {
    fn from(review: Review) -> Self {
        let approved = review.status == REVIEW_STATUS_APPROVED;
        ReceivedReview {
            id: review.id,
            review_cycle_id: review.review_cycle_id,
            relationship_type: review.relationship_type,
            status: review.status,
            performance_score: approved.then_some(review.performance_score),
            leadership_score: approved.then_some(review.leadership_score),
            teamwork_score: approved.then_some(review.teamwork_score),
            innovation_score: approved.then_some(review.innovation_score),
            strengths: approved.then_some(review.strengths),
            areas_for_improvement: approved.then_some(review.areas_for_improvement),
            training_recommendations: if approved {
                review.training_recommendations
            } else {
                None
            },
            approved_at: review.approved_at,
        }
    }
}
