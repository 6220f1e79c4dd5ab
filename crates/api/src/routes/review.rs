//! Route definitions for the reviewee view and the approval queue.
//!
//! ```text
//! GET    /received        received_reviews
//! GET    /pending         pending_reviews
//! POST   /{id}/approve    approve_review
//! POST   /{id}/reject     reject_review
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/received", get(review::received_reviews))
        .route("/pending", get(review::pending_reviews))
        .route("/{id}/approve", post(review::approve_review))
        .route("/{id}/reject", post(review::reject_review))
}
