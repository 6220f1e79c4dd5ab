pub mod admin;
pub mod assignment;
pub mod auth;
pub mod cycle;
pub mod health;
pub mod review;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                login (public)
/// /auth/me                                   authenticated identity
///
/// /admin/users                               list, create (admin only)
///
/// /cycles                                    list (authed), create (admin)
/// /cycles/{id}                               get (authed)
/// /cycles/{id}/activate                      draft -> active (admin, POST)
/// /cycles/{id}/complete                      active -> completed (admin, POST)
/// /cycles/{id}/assignments                   list, create (admin)
/// /cycles/{id}/reports/departments           department score report (manager)
/// /cycles/{id}/reports/top-performers        ranked reviewees (manager)
/// /cycles/{id}/reports/completion            assignment progress (manager)
/// /cycles/{id}/reports/training-recommendations  tag tally (manager)
/// /cycles/{id}/reports/improvement-areas     tag tally (manager)
///
/// /assignments/pending                       caller's open obligations
/// /assignments/{id}/review                   submit review (assignee, POST)
///
/// /reviews/received                          reviews about the caller
/// /reviews/pending                           approval queue (manager)
/// /reviews/{id}/approve                      approve (manager, POST)
/// /reviews/{id}/reject                       reject + reopen (manager, POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/cycles", cycle::router())
        .nest("/assignments", assignment::router())
        .nest("/reviews", review::router())
}
