//! Repository for the `reviews` table.

use fullcircle_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::review::{PendingReviewItem, Review, SubmitReview};

/// Column list for `reviews` queries.
const COLUMNS: &str = "id, review_cycle_id, reviewer_id, reviewee_id, relationship_type, \
    performance_score, leadership_score, teamwork_score, innovation_score, \
    strengths, areas_for_improvement, training_recommendations, \
    status, submitted_at, approved_at";

/// Provides CRUD operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Find a review by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a review by ID inside an open transaction, taking a row lock.
    pub async fn find_by_id_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find the review for a (cycle, reviewer, reviewee) triple, if any,
    /// locking the row for the duration of the transaction.
    pub async fn find_by_triple_for_update(
        tx: &mut Transaction<'_, Postgres>,
        cycle_id: DbId,
        reviewer_id: DbId,
        reviewee_id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE review_cycle_id = $1 AND reviewer_id = $2 AND reviewee_id = $3
             FOR UPDATE"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(cycle_id)
            .bind(reviewer_id)
            .bind(reviewee_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a fresh pending review inside an open transaction.
    ///
    /// The unique triple constraint backs this up under races; the caller
    /// maps that violation to a duplicate-review error.
    pub async fn insert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        cycle_id: DbId,
        reviewer_id: DbId,
        reviewee_id: DbId,
        relationship_type: &str,
        input: &SubmitReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews
                (review_cycle_id, reviewer_id, reviewee_id, relationship_type,
                 performance_score, leadership_score, teamwork_score, innovation_score,
                 strengths, areas_for_improvement, training_recommendations)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(cycle_id)
            .bind(reviewer_id)
            .bind(reviewee_id)
            .bind(relationship_type)
            .bind(input.performance_score)
            .bind(input.leadership_score)
            .bind(input.teamwork_score)
            .bind(input.innovation_score)
            .bind(&input.strengths)
            .bind(&input.areas_for_improvement)
            .bind(&input.training_recommendations)
            .fetch_one(&mut **tx)
            .await
    }

    /// Revise a rejected review in place: new scores and texts, status back
    /// to `pending`, fresh `submitted_at`, cleared `approved_at`.
    pub async fn resubmit_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        input: &SubmitReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                performance_score = $2,
                leadership_score = $3,
                teamwork_score = $4,
                innovation_score = $5,
                strengths = $6,
                areas_for_improvement = $7,
                training_recommendations = $8,
                status = 'pending',
                submitted_at = now(),
                approved_at = NULL
             WHERE id = $1 AND status = 'rejected'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(input.performance_score)
            .bind(input.leadership_score)
            .bind(input.teamwork_score)
            .bind(input.innovation_score)
            .bind(&input.strengths)
            .bind(&input.areas_for_improvement)
            .bind(&input.training_recommendations)
            .fetch_one(&mut **tx)
            .await
    }

    /// Approve a pending review inside an open transaction.
    pub async fn approve_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET status = 'approved', approved_at = now()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Reject a pending review inside an open transaction.
    pub async fn reject_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET status = 'rejected', approved_at = NULL
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// All reviews about a reviewee, newest submission first.
    pub async fn list_for_reviewee(
        pool: &PgPool,
        reviewee_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE reviewee_id = $1
             ORDER BY submitted_at DESC, id DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(reviewee_id)
            .fetch_all(pool)
            .await
    }

    /// All pending reviews, oldest submission first. Admin approval queue.
    pub async fn list_pending_all(pool: &PgPool) -> Result<Vec<PendingReviewItem>, sqlx::Error> {
        sqlx::query_as::<_, PendingReviewItem>(
            "SELECT
                r.id,
                r.review_cycle_id,
                c.name AS cycle_name,
                r.reviewer_id,
                reviewer.full_name AS reviewer_name,
                r.reviewee_id,
                reviewee.full_name AS reviewee_name,
                r.relationship_type,
                r.performance_score,
                r.leadership_score,
                r.teamwork_score,
                r.innovation_score,
                r.strengths,
                r.areas_for_improvement,
                r.training_recommendations,
                r.submitted_at
             FROM reviews r
             JOIN review_cycles c ON c.id = r.review_cycle_id
             JOIN users reviewer ON reviewer.id = r.reviewer_id
             JOIN users reviewee ON reviewee.id = r.reviewee_id
             WHERE r.status = 'pending'
             ORDER BY r.submitted_at ASC, r.id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Pending reviews whose reviewee belongs to the given department.
    ///
    /// This is the manager approval queue: managers only decide reviews of
    /// their own department's employees.
    pub async fn list_pending_for_department(
        pool: &PgPool,
        department: &str,
    ) -> Result<Vec<PendingReviewItem>, sqlx::Error> {
        sqlx::query_as::<_, PendingReviewItem>(
            "SELECT
                r.id,
                r.review_cycle_id,
                c.name AS cycle_name,
                r.reviewer_id,
                reviewer.full_name AS reviewer_name,
                r.reviewee_id,
                reviewee.full_name AS reviewee_name,
                r.relationship_type,
                r.performance_score,
                r.leadership_score,
                r.teamwork_score,
                r.innovation_score,
                r.strengths,
                r.areas_for_improvement,
                r.training_recommendations,
                r.submitted_at
             FROM reviews r
             JOIN review_cycles c ON c.id = r.review_cycle_id
             JOIN users reviewer ON reviewer.id = r.reviewer_id
             JOIN users reviewee ON reviewee.id = r.reviewee_id
             WHERE r.status = 'pending'
               AND reviewee.department = $1
             ORDER BY r.submitted_at ASC, r.id ASC",
        )
        .bind(department)
        .fetch_all(pool)
        .await
    }
}
