//! Handlers for the `/reviews` resource: the reviewee view and the manager
//! approval queue.

use axum::extract::{Path, State};
use axum::Json;
use fullcircle_core::error::CoreError;
use fullcircle_core::review::{DECISION_APPROVE, DECISION_REJECT};
use fullcircle_core::types::DbId;
use fullcircle_db::lifecycle;
use fullcircle_db::models::review::{PendingReviewItem, ReceivedReview, Review};
use fullcircle_db::repositories::{ReviewRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reviews/received
///
/// Reviews about the caller. Scores and feedback are only present once a
/// review is approved; before that only the status shows.
pub async fn received_reviews(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ReceivedReview>>>> {
    let reviews = ReviewRepo::list_for_reviewee(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: reviews.into_iter().map(ReceivedReview::from).collect(),
    }))
}

/// GET /api/v1/reviews/pending (manager)
///
/// The caller's approval queue. Managers see pending reviews of their own
/// department's employees; admins see all pending reviews.
pub async fn pending_reviews(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
) -> AppResult<Json<DataResponse<Vec<PendingReviewItem>>>> {
    let queue = if user.is_admin() {
        ReviewRepo::list_pending_all(&state.pool).await?
    } else {
        match manager_department(&state, &user).await? {
            Some(department) => {
                ReviewRepo::list_pending_for_department(&state.pool, &department).await?
            }
            // A manager without a department has no one to approve for.
            None => Vec::new(),
        }
    };

    Ok(Json(DataResponse { data: queue }))
}

/// POST /api/v1/reviews/{id}/approve (manager)
pub async fn approve_review(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(review_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Review>>> {
    authorize_decision(&state, &user, review_id).await?;
    let review = lifecycle::decide_review(&state.pool, review_id, DECISION_APPROVE).await?;
    Ok(Json(DataResponse { data: review }))
}

/// POST /api/v1/reviews/{id}/reject (manager)
///
/// Rejecting also reopens the assignment so the reviewer can resubmit.
pub async fn reject_review(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(review_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Review>>> {
    authorize_decision(&state, &user, review_id).await?;
    let review = lifecycle::decide_review(&state.pool, review_id, DECISION_REJECT).await?;
    Ok(Json(DataResponse { data: review }))
}

/// Managers may only decide reviews whose reviewee is in their department;
/// admins may decide any.
async fn authorize_decision(
    state: &AppState,
    user: &AuthUser,
    review_id: DbId,
) -> AppResult<()> {
    if user.is_admin() {
        return Ok(());
    }

    let review = ReviewRepo::find_by_id(&state.pool, review_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Review",
            id: review_id,
        })?;

    let reviewee = UserRepo::find_by_id(&state.pool, review.reviewee_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: review.reviewee_id,
        })?;

    let department = manager_department(state, user).await?;
    if department.is_none() || department != reviewee.department {
        return Err(AppError::Core(CoreError::Forbidden(
            "Managers may only decide reviews within their own department".into(),
        )));
    }

    Ok(())
}

/// Look up the caller's department from their user row.
async fn manager_department(state: &AppState, user: &AuthUser) -> AppResult<Option<String>> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        })?;
    Ok(row.department)
}
