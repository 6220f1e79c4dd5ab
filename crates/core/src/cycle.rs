//! Review cycle status vocabulary and transition rules.
//!
//! A cycle moves strictly forward: `draft -> active -> completed`. There
//! are no reverse transitions. Assignments may only be added while the
//! cycle is still a draft; reviews may only be submitted while it is
//! active.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Cycle exists but is not yet open for submissions.
pub const CYCLE_STATUS_DRAFT: &str = "draft";

/// Cycle is open: reviewers may submit against their assignments.
pub const CYCLE_STATUS_ACTIVE: &str = "active";

/// Cycle is frozen for reporting. No further mutation.
pub const CYCLE_STATUS_COMPLETED: &str = "completed";

/// All valid cycle status values.
pub const VALID_CYCLE_STATUSES: &[&str] = &[
    CYCLE_STATUS_DRAFT,
    CYCLE_STATUS_ACTIVE,
    CYCLE_STATUS_COMPLETED,
];

/// Validate the inputs for a new review cycle.
///
/// The name must be non-blank and the end date must not precede the start
/// date. A zero-length cycle (start == end) is allowed.
pub fn validate_new_cycle(name: &str, start_date: Timestamp, end_date: Timestamp) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Cycle name must not be empty".to_string(),
        ));
    }
    if end_date < start_date {
        return Err(CoreError::Validation(format!(
            "Cycle end date {end_date} precedes start date {start_date}"
        )));
    }
    Ok(())
}

/// Check that a cycle in `current` status may be activated.
pub fn ensure_activatable(current: &str) -> Result<(), CoreError> {
    if current == CYCLE_STATUS_DRAFT {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition(format!(
            "Cycle in status '{current}' cannot be activated; only '{CYCLE_STATUS_DRAFT}' cycles can"
        )))
    }
}

/// Check that a cycle in `current` status may be completed.
pub fn ensure_completable(current: &str) -> Result<(), CoreError> {
    if current == CYCLE_STATUS_ACTIVE {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition(format!(
            "Cycle in status '{current}' cannot be completed; only '{CYCLE_STATUS_ACTIVE}' cycles can"
        )))
    }
}

/// Check that a cycle in `current` status still accepts new assignments.
pub fn ensure_accepts_assignments(current: &str) -> Result<(), CoreError> {
    if current == CYCLE_STATUS_DRAFT {
        Ok(())
    } else {
        Err(CoreError::InvalidState(format!(
            "Assignments can only be added to a '{CYCLE_STATUS_DRAFT}' cycle, not '{current}'"
        )))
    }
}

/// Check that a cycle in `current` status accepts review submissions.
pub fn ensure_accepts_submissions(current: &str) -> Result<(), CoreError> {
    if current == CYCLE_STATUS_ACTIVE {
        Ok(())
    } else {
        Err(CoreError::InvalidState(format!(
            "Reviews can only be submitted while the cycle is '{CYCLE_STATUS_ACTIVE}', not '{current}'"
        )))
    }
}
