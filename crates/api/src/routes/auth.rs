//! Route definitions for authentication.
//!
//! ```text
//! POST   /login     login
//! GET    /me        authenticated identity
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
}
