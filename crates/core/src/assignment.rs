//! Review assignment vocabulary and validation.
//!
//! An assignment is the obligation "reviewer X owes a review of Y in cycle
//! Z". It starts `pending` and flips to `completed` exactly when its review
//! is created; a rejected review reopens it (see the resubmission contract
//! in `review`).

use crate::error::CoreError;
use crate::types::DbId;

pub const RELATIONSHIP_PEER: &str = "peer";
pub const RELATIONSHIP_SUPERIOR: &str = "superior";
pub const RELATIONSHIP_SUBORDINATE: &str = "subordinate";
pub const RELATIONSHIP_SELF: &str = "self";

/// All valid reviewer/reviewee relationship types.
pub const VALID_RELATIONSHIP_TYPES: &[&str] = &[
    RELATIONSHIP_PEER,
    RELATIONSHIP_SUPERIOR,
    RELATIONSHIP_SUBORDINATE,
    RELATIONSHIP_SELF,
];

/// Assignment has not produced a review yet.
pub const ASSIGNMENT_STATUS_PENDING: &str = "pending";

/// Assignment's review has been submitted.
pub const ASSIGNMENT_STATUS_COMPLETED: &str = "completed";

/// All valid assignment status values.
pub const VALID_ASSIGNMENT_STATUSES: &[&str] =
    &[ASSIGNMENT_STATUS_PENDING, ASSIGNMENT_STATUS_COMPLETED];

/// Validate that a relationship type string is one of the accepted values.
pub fn validate_relationship_type(relationship_type: &str) -> Result<(), CoreError> {
    if VALID_RELATIONSHIP_TYPES.contains(&relationship_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid relationship type '{relationship_type}'. Must be one of: {}",
            VALID_RELATIONSHIP_TYPES.join(", ")
        )))
    }
}

/// Validate the reviewer/reviewee pairing of a new assignment.
///
/// A user never reviews themself through an assignment, regardless of the
/// declared relationship type.
pub fn validate_participants(reviewer_id: DbId, reviewee_id: DbId) -> Result<(), CoreError> {
    if reviewer_id == reviewee_id {
        return Err(CoreError::Validation(format!(
            "Reviewer and reviewee must differ (both were user {reviewer_id})"
        )));
    }
    Ok(())
}

/// Check that an assignment in `current` status accepts a review submission.
pub fn ensure_submittable(current: &str) -> Result<(), CoreError> {
    if current == ASSIGNMENT_STATUS_PENDING {
        Ok(())
    } else {
        Err(CoreError::InvalidState(format!(
            "Assignment in status '{current}' cannot accept a review; it must be '{ASSIGNMENT_STATUS_PENDING}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_relationship_types_accepted() {
        for rel in VALID_RELATIONSHIP_TYPES {
            assert!(validate_relationship_type(rel).is_ok());
        }
    }

    #[test]
    fn test_unknown_relationship_type_rejected() {
        let result = validate_relationship_type("mentor");
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_distinct_participants_accepted() {
        assert!(validate_participants(1, 2).is_ok());
    }

    #[test]
    fn test_self_assignment_rejected() {
        let result = validate_participants(7, 7);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_pending_assignment_is_submittable() {
        assert!(ensure_submittable(ASSIGNMENT_STATUS_PENDING).is_ok());
    }

    #[test]
    fn test_completed_assignment_is_not_submittable() {
        let result = ensure_submittable(ASSIGNMENT_STATUS_COMPLETED);
        assert!(matches!(result, Err(CoreError::InvalidState(_))));
    }
}
