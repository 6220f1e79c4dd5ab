//! Read-only aggregate queries over a cycle's reviews and assignments.
//!
//! Every function takes a cycle id and returns a flat projection; none
//! mutates state, and empty inputs produce empty/zero results rather than
//! errors. All aggregation is O(reviews in cycle); no pagination at the
//! expected data scale.

use fullcircle_core::reporting;
use fullcircle_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::{
    CompletionStatus, DepartmentScore, ImprovementAreaCount, TopPerformer,
    TrainingRecommendationCount,
};
use crate::repositories::CycleRepo;

/// Provides the reporting queries for completed (and running) cycles.
pub struct ReportRepo;

impl ReportRepo {
    /// Mean scores per department over APPROVED reviews in the cycle,
    /// grouped by the reviewee's department.
    ///
    /// Departments with zero approved reviews are omitted, not zero-filled,
    /// and reviewees without a department are skipped.
    pub async fn department_scores(
        pool: &PgPool,
        cycle_id: DbId,
    ) -> Result<Vec<DepartmentScore>, sqlx::Error> {
        sqlx::query_as::<_, DepartmentScore>(
            "SELECT
                u.department AS department,
                AVG(r.performance_score) AS avg_performance,
                AVG(r.leadership_score) AS avg_leadership,
                AVG(r.teamwork_score) AS avg_teamwork,
                AVG(r.innovation_score) AS avg_innovation,
                COUNT(DISTINCT r.reviewee_id) AS total_employees
             FROM reviews r
             JOIN users u ON u.id = r.reviewee_id
             WHERE r.review_cycle_id = $1
               AND r.status = 'approved'
               AND u.department IS NOT NULL
             GROUP BY u.department
             ORDER BY u.department ASC",
        )
        .bind(cycle_id)
        .fetch_all(pool)
        .await
    }

    /// Per-reviewee mean scores across ALL reviews in the cycle, ranked by
    /// mean performance descending.
    ///
    /// Approval status is deliberately not filtered here (it mirrors the
    /// long-standing reporting behavior); ties keep first-submission order.
    pub async fn top_performers(
        pool: &PgPool,
        cycle_id: DbId,
        limit: i64,
    ) -> Result<Vec<TopPerformer>, sqlx::Error> {
        sqlx::query_as::<_, TopPerformer>(
            "SELECT
                r.reviewee_id,
                u.full_name,
                u.department,
                AVG(r.performance_score) AS avg_performance,
                AVG(r.leadership_score) AS avg_leadership,
                AVG(r.teamwork_score) AS avg_teamwork,
                AVG(r.innovation_score) AS avg_innovation
             FROM reviews r
             JOIN users u ON u.id = r.reviewee_id
             WHERE r.review_cycle_id = $1
             GROUP BY r.reviewee_id, u.full_name, u.department
             ORDER BY avg_performance DESC, MIN(r.id) ASC
             LIMIT $2",
        )
        .bind(cycle_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Assignment completion progress for a cycle.
    ///
    /// Returns `None` when the cycle itself does not exist; a cycle with
    /// zero assignments reports a completion rate of 0 (no divide-by-zero).
    pub async fn completion_status(
        pool: &PgPool,
        cycle_id: DbId,
    ) -> Result<Option<CompletionStatus>, sqlx::Error> {
        let Some(cycle) = CycleRepo::find_by_id(pool, cycle_id).await? else {
            return Ok(None);
        };

        let (total, completed): (i64, i64) = sqlx::query_as(
            "SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'completed')
             FROM review_assignments
             WHERE review_cycle_id = $1",
        )
        .bind(cycle_id)
        .fetch_one(pool)
        .await?;

        Ok(Some(CompletionStatus {
            cycle_id: cycle.id,
            cycle_name: cycle.name,
            start_date: cycle.start_date,
            end_date: cycle.end_date,
            total_assignments: total,
            completed_assignments: completed,
            pending_assignments: total - completed,
            completion_rate: reporting::completion_rate(completed, total),
        }))
    }

    /// Tally of training recommendation tags across all reviews in the
    /// cycle, irrespective of review status. Sorted by count descending,
    /// ties in first-seen (submission) order.
    pub async fn training_recommendations(
        pool: &PgPool,
        cycle_id: DbId,
    ) -> Result<Vec<TrainingRecommendationCount>, sqlx::Error> {
        let texts: Vec<String> = sqlx::query_scalar(
            "SELECT training_recommendations FROM reviews
             WHERE review_cycle_id = $1
               AND training_recommendations IS NOT NULL
             ORDER BY id ASC",
        )
        .bind(cycle_id)
        .fetch_all(pool)
        .await?;

        Ok(reporting::tally_tags(texts.iter().map(String::as_str))
            .into_iter()
            .map(TrainingRecommendationCount::from)
            .collect())
    }

    /// Tally of improvement-area tags across all reviews in the cycle,
    /// irrespective of review status.
    pub async fn improvement_areas(
        pool: &PgPool,
        cycle_id: DbId,
    ) -> Result<Vec<ImprovementAreaCount>, sqlx::Error> {
        let texts: Vec<String> = sqlx::query_scalar(
            "SELECT areas_for_improvement FROM reviews
             WHERE review_cycle_id = $1
             ORDER BY id ASC",
        )
        .bind(cycle_id)
        .fetch_all(pool)
        .await?;

        Ok(reporting::tally_tags(texts.iter().map(String::as_str))
            .into_iter()
            .map(ImprovementAreaCount::from)
            .collect())
    }
}
