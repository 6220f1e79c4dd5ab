//! The lifecycle engine: every legal state transition over cycles,
//! assignments, and reviews, each as a short all-or-nothing transaction.
//!
//! Callers supply explicit ids; there is no ambient session state here and
//! no role gating (the API layer authorizes before it calls in). Side
//! effects are confined to the affected rows; nothing cascades.

use fullcircle_core::error::CoreError;
use fullcircle_core::types::DbId;
use fullcircle_core::{assignment, cycle, review};
use sqlx::PgPool;

use crate::models::assignment::{CreateAssignment, ReviewAssignment};
use crate::models::cycle::{CreateCycle, ReviewCycle};
use crate::models::review::{Review, SubmitReview};
use crate::repositories::{AssignmentRepo, CycleRepo, ReviewRepo, UserRepo};

/// Error type for lifecycle operations.
///
/// Domain failures (validation, illegal transitions, duplicates) and
/// storage failures stay distinct; a storage fault is always fatal to the
/// operation and never silently swallowed.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Convenience alias for lifecycle operation results.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Map a unique-constraint violation on the review triple to
/// [`CoreError::DuplicateReview`]; pass everything else through as storage.
fn map_review_insert_error(err: sqlx::Error) -> LifecycleError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some("uq_reviews_cycle_reviewer_reviewee")
        {
            return LifecycleError::Domain(CoreError::DuplicateReview(
                "A review for this reviewer and reviewee already exists in this cycle"
                    .to_string(),
            ));
        }
    }
    LifecycleError::Storage(err)
}

/// Create a new review cycle in `draft` status.
///
/// Fails with `Validation` for a blank name or `end < start`, and with
/// `NotFound` when the creating user does not exist. Nothing is persisted
/// on failure.
pub async fn create_cycle(
    pool: &PgPool,
    input: &CreateCycle,
    created_by: DbId,
) -> LifecycleResult<ReviewCycle> {
    cycle::validate_new_cycle(&input.name, input.start_date, input.end_date)?;

    if !UserRepo::exists(pool, created_by).await? {
        return Err(CoreError::NotFound {
            entity: "User",
            id: created_by,
        }
        .into());
    }

    let created = CycleRepo::create(pool, input, created_by).await?;
    tracing::info!(cycle_id = created.id, name = %created.name, "Review cycle created");
    Ok(created)
}

/// Activate a draft cycle, opening it for review submissions.
pub async fn activate_cycle(pool: &PgPool, cycle_id: DbId) -> LifecycleResult<ReviewCycle> {
    transition_cycle(
        pool,
        cycle_id,
        cycle::CYCLE_STATUS_DRAFT,
        cycle::CYCLE_STATUS_ACTIVE,
        cycle::ensure_activatable,
    )
    .await
}

/// Complete an active cycle, freezing it for reporting.
pub async fn complete_cycle(pool: &PgPool, cycle_id: DbId) -> LifecycleResult<ReviewCycle> {
    transition_cycle(
        pool,
        cycle_id,
        cycle::CYCLE_STATUS_ACTIVE,
        cycle::CYCLE_STATUS_COMPLETED,
        cycle::ensure_completable,
    )
    .await
}

/// Shared cycle transition: validate against the current status, then
/// compare-and-swap so a concurrent duplicate transition loses cleanly.
async fn transition_cycle(
    pool: &PgPool,
    cycle_id: DbId,
    from: &str,
    to: &str,
    ensure: fn(&str) -> Result<(), CoreError>,
) -> LifecycleResult<ReviewCycle> {
    let current = CycleRepo::find_by_id(pool, cycle_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ReviewCycle",
            id: cycle_id,
        })?;

    ensure(&current.status)?;

    match CycleRepo::set_status(pool, cycle_id, from, to).await? {
        Some(updated) => {
            tracing::info!(cycle_id, from, to, "Review cycle transitioned");
            Ok(updated)
        }
        // Lost a race with another transition between the read and the swap.
        None => Err(CoreError::InvalidTransition(format!(
            "Cycle {cycle_id} left status '{from}' before the transition applied"
        ))
        .into()),
    }
}

/// Add a review assignment to a draft cycle.
///
/// The due date is copied from the cycle's end date. Fails with
/// `InvalidState` once the cycle is no longer a draft, `Validation` for a
/// self-review pairing or unknown relationship type, and `NotFound` for
/// missing users or cycle.
pub async fn add_assignment(
    pool: &PgPool,
    cycle_id: DbId,
    input: &CreateAssignment,
) -> LifecycleResult<ReviewAssignment> {
    assignment::validate_relationship_type(&input.relationship_type)?;
    assignment::validate_participants(input.reviewer_id, input.reviewee_id)?;

    let cycle_row = CycleRepo::find_by_id(pool, cycle_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ReviewCycle",
            id: cycle_id,
        })?;
    cycle::ensure_accepts_assignments(&cycle_row.status)?;

    for user_id in [input.reviewer_id, input.reviewee_id] {
        if !UserRepo::exists(pool, user_id).await? {
            return Err(CoreError::NotFound {
                entity: "User",
                id: user_id,
            }
            .into());
        }
    }

    let created = AssignmentRepo::create(pool, cycle_id, input, cycle_row.end_date).await?;
    tracing::info!(
        assignment_id = created.id,
        cycle_id,
        reviewer_id = created.reviewer_id,
        reviewee_id = created.reviewee_id,
        relationship_type = %created.relationship_type,
        "Review assignment added"
    );
    Ok(created)
}

/// Submit a review against a pending assignment in an active cycle.
///
/// Creates the review in `pending` status and flips the assignment to
/// `completed`, atomically: both writes commit or neither does. If a
/// rejected review already exists for the triple it is revised in place
/// (the resubmission path); any other existing review is a
/// `DuplicateReview`. The row lock on the assignment plus the unique
/// triple constraint serialize concurrent submissions.
pub async fn submit_review(
    pool: &PgPool,
    assignment_id: DbId,
    input: &SubmitReview,
) -> LifecycleResult<Review> {
    review::validate_scores(&input.score_set())?;
    review::validate_feedback(&input.strengths, &input.areas_for_improvement)?;

    let mut tx = pool.begin().await?;

    let assignment_row = AssignmentRepo::find_by_id_for_update(&mut tx, assignment_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ReviewAssignment",
            id: assignment_id,
        })?;
    assignment::ensure_submittable(&assignment_row.status)?;

    let cycle_row = CycleRepo::find_by_id_in_tx(&mut tx, assignment_row.review_cycle_id)
        .await?
        .ok_or_else(|| {
            CoreError::Internal(format!(
                "Assignment {assignment_id} references missing cycle {}",
                assignment_row.review_cycle_id
            ))
        })?;
    cycle::ensure_accepts_submissions(&cycle_row.status)?;

    let existing = ReviewRepo::find_by_triple_for_update(
        &mut tx,
        assignment_row.review_cycle_id,
        assignment_row.reviewer_id,
        assignment_row.reviewee_id,
    )
    .await?;

    let review_row = match existing {
        Some(previous) => {
            review::ensure_resubmittable(&previous.status)?;
            let revised = ReviewRepo::resubmit_in_tx(&mut tx, previous.id, input).await?;
            tracing::info!(
                review_id = revised.id,
                assignment_id,
                "Rejected review resubmitted"
            );
            revised
        }
        None => ReviewRepo::insert_in_tx(
            &mut tx,
            assignment_row.review_cycle_id,
            assignment_row.reviewer_id,
            assignment_row.reviewee_id,
            &assignment_row.relationship_type,
            input,
        )
        .await
        .map_err(map_review_insert_error)?,
    };

    let flipped = AssignmentRepo::set_status_in_tx(
        &mut tx,
        assignment_id,
        assignment::ASSIGNMENT_STATUS_PENDING,
        assignment::ASSIGNMENT_STATUS_COMPLETED,
    )
    .await?;
    if !flipped {
        // The assignment row is locked; its status cannot have moved.
        return Err(CoreError::Internal(format!(
            "Assignment {assignment_id} changed status under lock"
        ))
        .into());
    }

    tx.commit().await?;

    tracing::info!(
        review_id = review_row.id,
        assignment_id,
        cycle_id = review_row.review_cycle_id,
        reviewer_id = review_row.reviewer_id,
        reviewee_id = review_row.reviewee_id,
        "Review submitted"
    );
    Ok(review_row)
}

/// Decide a pending review: `approve` or `reject`.
///
/// Approving stamps `approved_at`. Rejecting reopens the assignment behind
/// the review in the same transaction so the reviewer can resubmit.
pub async fn decide_review(
    pool: &PgPool,
    review_id: DbId,
    decision: &str,
) -> LifecycleResult<Review> {
    review::validate_decision(decision)?;

    let mut tx = pool.begin().await?;

    let existing = ReviewRepo::find_by_id_for_update(&mut tx, review_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Review",
            id: review_id,
        })?;
    review::ensure_decidable(&existing.status)?;

    let updated = if decision == review::DECISION_APPROVE {
        ReviewRepo::approve_in_tx(&mut tx, review_id).await?
    } else {
        let rejected = ReviewRepo::reject_in_tx(&mut tx, review_id).await?;
        if rejected.is_some() {
            AssignmentRepo::reopen_in_tx(
                &mut tx,
                existing.review_cycle_id,
                existing.reviewer_id,
                existing.reviewee_id,
            )
            .await?;
        }
        rejected
    };

    // The review row is locked; the guarded update cannot have missed.
    let review_row = updated.ok_or_else(|| {
        CoreError::Internal(format!("Review {review_id} changed status under lock"))
    })?;

    tx.commit().await?;

    tracing::info!(
        review_id,
        decision,
        status = %review_row.status,
        "Review decided"
    );
    Ok(review_row)
}
