//! Handlers for the `/cycles` resource: CRUD, transitions, and assignments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fullcircle_core::error::CoreError;
use fullcircle_core::types::DbId;
use fullcircle_db::lifecycle;
use fullcircle_db::models::assignment::{CreateAssignment, ReviewAssignment};
use fullcircle_db::models::cycle::{CreateCycle, ReviewCycle};
use fullcircle_db::repositories::{AssignmentRepo, CycleRepo};

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/cycles (admin)
///
/// Create a review cycle in `draft` status.
pub async fn create_cycle(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateCycle>,
) -> AppResult<(StatusCode, Json<DataResponse<ReviewCycle>>)> {
    let cycle = lifecycle::create_cycle(&state.pool, &input, admin.user_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: cycle })))
}

/// GET /api/v1/cycles
///
/// List all cycles, most recently created first.
pub async fn list_cycles(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<ReviewCycle>>>> {
    let cycles = CycleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: cycles }))
}

/// GET /api/v1/cycles/{id}
pub async fn get_cycle(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReviewCycle>>> {
    let cycle = CycleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ReviewCycle",
            id,
        })?;
    Ok(Json(DataResponse { data: cycle }))
}

/// POST /api/v1/cycles/{id}/activate (admin)
pub async fn activate_cycle(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReviewCycle>>> {
    let cycle = lifecycle::activate_cycle(&state.pool, id).await?;
    Ok(Json(DataResponse { data: cycle }))
}

/// POST /api/v1/cycles/{id}/complete (admin)
pub async fn complete_cycle(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReviewCycle>>> {
    let cycle = lifecycle::complete_cycle(&state.pool, id).await?;
    Ok(Json(DataResponse { data: cycle }))
}

/// POST /api/v1/cycles/{id}/assignments (admin)
///
/// Add a review assignment to a draft cycle.
pub async fn add_assignment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(cycle_id): Path<DbId>,
    Json(input): Json<CreateAssignment>,
) -> AppResult<(StatusCode, Json<DataResponse<ReviewAssignment>>)> {
    let assignment = lifecycle::add_assignment(&state.pool, cycle_id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: assignment }),
    ))
}

/// GET /api/v1/cycles/{id}/assignments (admin)
pub async fn list_assignments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(cycle_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ReviewAssignment>>>> {
    // Distinguish "no assignments" from "no such cycle".
    if CycleRepo::find_by_id(&state.pool, cycle_id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "ReviewCycle",
            id: cycle_id,
        }
        .into());
    }

    let assignments = AssignmentRepo::list_for_cycle(&state.pool, cycle_id).await?;
    Ok(Json(DataResponse { data: assignments }))
}
