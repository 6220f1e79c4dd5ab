use crate::types::DbId;

/// Domain error kinds shared across the db and api crates.
///
/// Storage-level failures are deliberately NOT represented here; the db
/// crate wraps `sqlx::Error` separately so I/O faults never masquerade as
/// domain outcomes.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// An illegal state change was attempted on the entity itself
    /// (e.g. activating an already-active cycle).
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// The operation's owning entity is in the wrong state
    /// (e.g. adding assignments to a non-draft cycle).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A review already exists for the (cycle, reviewer, reviewee) triple.
    #[error("Duplicate review: {0}")]
    DuplicateReview(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
