//! Route definitions for admin user management.
//!
//! ```text
//! GET    /users     list_users
//! POST   /users     create_user
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(admin::list_users).post(admin::create_user))
}
