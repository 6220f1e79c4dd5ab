//! Route definitions for review cycles, their assignments, and reports.
//!
//! ```text
//! GET    /                                     list_cycles
//! POST   /                                     create_cycle
//! GET    /{id}                                 get_cycle
//! POST   /{id}/activate                        activate_cycle
//! POST   /{id}/complete                        complete_cycle
//! GET    /{id}/assignments                     list_assignments
//! POST   /{id}/assignments                     add_assignment
//! GET    /{id}/reports/departments             department_scores
//! GET    /{id}/reports/top-performers          top_performers
//! GET    /{id}/reports/completion              completion_status
//! GET    /{id}/reports/training-recommendations  training_recommendations
//! GET    /{id}/reports/improvement-areas       improvement_areas
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{cycle, report};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cycle::list_cycles).post(cycle::create_cycle))
        .route("/{id}", get(cycle::get_cycle))
        .route("/{id}/activate", post(cycle::activate_cycle))
        .route("/{id}/complete", post(cycle::complete_cycle))
        .route(
            "/{id}/assignments",
            get(cycle::list_assignments).post(cycle::add_assignment),
        )
        .route("/{id}/reports/departments", get(report::department_scores))
        .route("/{id}/reports/top-performers", get(report::top_performers))
        .route("/{id}/reports/completion", get(report::completion_status))
        .route(
            "/{id}/reports/training-recommendations",
            get(report::training_recommendations),
        )
        .route(
            "/{id}/reports/improvement-areas",
            get(report::improvement_areas),
        )
}
