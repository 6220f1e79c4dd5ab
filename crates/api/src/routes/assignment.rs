//! Route definitions for the reviewer-facing assignment endpoints.
//!
//! ```text
//! GET    /pending         pending_assignments
//! POST   /{id}/review     submit_review
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assignment;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(assignment::pending_assignments))
        .route("/{id}/review", post(assignment::submit_review))
}
