//! Read-only reporting projections.
//!
//! Flat key/value shapes suitable for direct tabulation or charting by the
//! presentation layer. None of these are ever written back.

use fullcircle_core::reporting::TagCount;
use fullcircle_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Per-department mean scores over approved reviews in a cycle.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentScore {
    pub department: String,
    pub avg_performance: f64,
    pub avg_leadership: f64,
    pub avg_teamwork: f64,
    pub avg_innovation: f64,
    /// Distinct reviewees with at least one approved review.
    pub total_employees: i64,
}

/// Per-reviewee mean scores across all reviews in a cycle.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopPerformer {
    pub reviewee_id: DbId,
    pub full_name: String,
    pub department: Option<String>,
    pub avg_performance: f64,
    pub avg_leadership: f64,
    pub avg_teamwork: f64,
    pub avg_innovation: f64,
}

/// Assignment completion progress for a cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionStatus {
    pub cycle_id: DbId,
    pub cycle_name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub total_assignments: i64,
    pub completed_assignments: i64,
    pub pending_assignments: i64,
    /// Percentage in [0.0, 100.0]; 0.0 when the cycle has no assignments.
    pub completion_rate: f64,
}

/// Frequency of one training recommendation tag across a cycle.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingRecommendationCount {
    pub recommendation: String,
    pub count: i64,
}

impl From<TagCount> for TrainingRecommendationCount {
    fn from(tc: TagCount) -> Self {
        TrainingRecommendationCount {
            recommendation: tc.tag,
            count: tc.count,
        }
    }
}

/// Frequency of one improvement-area tag across a cycle.
#[derive(Debug, Clone, Serialize)]
pub struct ImprovementAreaCount {
    pub area: String,
    pub count: i64,
}

impl From<TagCount> for ImprovementAreaCount {
    fn from(tc: TagCount) -> Self {
        ImprovementAreaCount {
            area: tc.tag,
            count: tc.count,
        }
    }
}
