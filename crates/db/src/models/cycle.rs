//! Review cycle entity model and DTOs.

use fullcircle_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `review_cycles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewCycle {
    pub id: DbId,
    pub name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a new review cycle. Cycles always start as drafts.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCycle {
    pub name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}
