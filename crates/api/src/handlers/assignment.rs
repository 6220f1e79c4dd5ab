//! Handlers for the `/assignments` resource: the reviewer-facing side.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fullcircle_core::error::CoreError;
use fullcircle_core::types::DbId;
use fullcircle_db::lifecycle;
use fullcircle_db::models::assignment::PendingAssignment;
use fullcircle_db::models::review::{Review, SubmitReview};
use fullcircle_db::repositories::AssignmentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/assignments/pending
///
/// The caller's open review obligations in currently active cycles.
pub async fn pending_assignments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<PendingAssignment>>>> {
    let pending = AssignmentRepo::list_pending_for_reviewer(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: pending }))
}

/// POST /api/v1/assignments/{id}/review
///
/// Submit a review against an assignment. Only the assignment's reviewer
/// may submit; everyone else gets 403.
pub async fn submit_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(assignment_id): Path<DbId>,
    Json(input): Json<SubmitReview>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    let assignment = AssignmentRepo::find_by_id(&state.pool, assignment_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ReviewAssignment",
            id: assignment_id,
        })?;

    if assignment.reviewer_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the assigned reviewer may submit this review".into(),
        )));
    }

    let review = lifecycle::submit_review(&state.pool, assignment_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}
