//! Review assignment entity model and DTOs.

use fullcircle_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `review_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewAssignment {
    pub id: DbId,
    pub review_cycle_id: DbId,
    pub reviewer_id: DbId,
    pub reviewee_id: DbId,
    pub relationship_type: String,
    pub status: String,
    pub due_date: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for adding an assignment to a draft cycle.
///
/// `due_date` is not accepted from the caller; it is copied from the
/// cycle's end_date at creation time.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignment {
    pub reviewer_id: DbId,
    pub reviewee_id: DbId,
    pub relationship_type: String,
}

/// A reviewer's open obligation, enriched with names for display.
///
/// Drives the "review a colleague" queue; only assignments whose cycle is
/// currently active appear.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingAssignment {
    pub id: DbId,
    pub review_cycle_id: DbId,
    pub cycle_name: String,
    pub reviewee_id: DbId,
    pub reviewee_name: String,
    pub relationship_type: String,
    pub due_date: Timestamp,
}
