//! Repository for the `review_assignments` table.

use fullcircle_core::types::{DbId, Timestamp};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::assignment::{CreateAssignment, PendingAssignment, ReviewAssignment};

/// Column list for `review_assignments` queries.
const COLUMNS: &str = "id, review_cycle_id, reviewer_id, reviewee_id, \
    relationship_type, status, due_date, created_at";

/// Provides CRUD operations for review assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert a new pending assignment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        cycle_id: DbId,
        input: &CreateAssignment,
        due_date: Timestamp,
    ) -> Result<ReviewAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO review_assignments
                (review_cycle_id, reviewer_id, reviewee_id, relationship_type, due_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReviewAssignment>(&query)
            .bind(cycle_id)
            .bind(input.reviewer_id)
            .bind(input.reviewee_id)
            .bind(&input.relationship_type)
            .bind(due_date)
            .fetch_one(pool)
            .await
    }

    /// Find an assignment by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReviewAssignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM review_assignments WHERE id = $1");
        sqlx::query_as::<_, ReviewAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an assignment by ID inside an open transaction, taking a row
    /// lock so concurrent submissions against it serialize.
    pub async fn find_by_id_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<ReviewAssignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM review_assignments WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, ReviewAssignment>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List all assignments for a cycle, oldest first.
    pub async fn list_for_cycle(
        pool: &PgPool,
        cycle_id: DbId,
    ) -> Result<Vec<ReviewAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM review_assignments
             WHERE review_cycle_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ReviewAssignment>(&query)
            .bind(cycle_id)
            .fetch_all(pool)
            .await
    }

    /// A reviewer's open obligations in currently active cycles.
    pub async fn list_pending_for_reviewer(
        pool: &PgPool,
        reviewer_id: DbId,
    ) -> Result<Vec<PendingAssignment>, sqlx::Error> {
        sqlx::query_as::<_, PendingAssignment>(
            "SELECT
                a.id,
                a.review_cycle_id,
                c.name AS cycle_name,
                a.reviewee_id,
                u.full_name AS reviewee_name,
                a.relationship_type,
                a.due_date
             FROM review_assignments a
             JOIN review_cycles c ON c.id = a.review_cycle_id
             JOIN users u ON u.id = a.reviewee_id
             WHERE a.reviewer_id = $1
               AND a.status = 'pending'
               AND c.status = 'active'
             ORDER BY a.due_date ASC, a.id ASC",
        )
        .bind(reviewer_id)
        .fetch_all(pool)
        .await
    }

    /// Compare-and-swap status update inside an open transaction.
    ///
    /// Returns `false` when the assignment was not in `from` status.
    pub async fn set_status_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE review_assignments SET status = $3 WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Reopen the completed assignment behind a rejected review.
    ///
    /// Matched by triple rather than ID because the review row does not
    /// carry the assignment ID. Part of the reject transaction.
    pub async fn reopen_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        cycle_id: DbId,
        reviewer_id: DbId,
        reviewee_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE review_assignments SET status = 'pending'
             WHERE review_cycle_id = $1
               AND reviewer_id = $2
               AND reviewee_id = $3
               AND status = 'completed'",
        )
        .bind(cycle_id)
        .bind(reviewer_id)
        .bind(reviewee_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() >= 1)
    }
}
