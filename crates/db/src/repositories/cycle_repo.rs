//! Repository for the `review_cycles` table.

use fullcircle_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::cycle::{CreateCycle, ReviewCycle};

/// Column list for `review_cycles` queries.
const COLUMNS: &str = "id, name, start_date, end_date, status, created_by, created_at";

/// Provides CRUD operations for review cycles.
pub struct CycleRepo;

impl CycleRepo {
    /// Insert a new cycle in `draft` status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCycle,
        created_by: DbId,
    ) -> Result<ReviewCycle, sqlx::Error> {
        let query = format!(
            "INSERT INTO review_cycles (name, start_date, end_date, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReviewCycle>(&query)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a cycle by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ReviewCycle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM review_cycles WHERE id = $1");
        sqlx::query_as::<_, ReviewCycle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Same as [`CycleRepo::find_by_id`] but inside an open transaction.
    pub async fn find_by_id_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<ReviewCycle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM review_cycles WHERE id = $1");
        sqlx::query_as::<_, ReviewCycle>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List all cycles, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ReviewCycle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM review_cycles ORDER BY created_at DESC");
        sqlx::query_as::<_, ReviewCycle>(&query)
            .fetch_all(pool)
            .await
    }

    /// Compare-and-swap status update.
    ///
    /// Returns the updated row, or `None` when the cycle was not in `from`
    /// status at update time (including the case where it does not exist).
    /// The guard makes concurrent duplicate transitions lose cleanly.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<ReviewCycle>, sqlx::Error> {
        let query = format!(
            "UPDATE review_cycles SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReviewCycle>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }
}
