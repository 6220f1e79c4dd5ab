//! Handlers for the `/cycles/{id}/reports/*` endpoints.
//!
//! All report endpoints require manager or admin role and 404 on unknown
//! cycles; empty cycles return empty collections rather than errors.

use axum::extract::{Path, Query, State};
use axum::Json;
use fullcircle_core::error::CoreError;
use fullcircle_core::types::DbId;
use fullcircle_db::models::report::{
    CompletionStatus, DepartmentScore, ImprovementAreaCount, TopPerformer,
    TrainingRecommendationCount,
};
use fullcircle_db::repositories::{CycleRepo, ReportRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of rows returned by the top-performers report.
const DEFAULT_TOP_PERFORMERS_LIMIT: i64 = 10;

/// Query parameters for `GET /cycles/{id}/reports/top-performers`.
#[derive(Debug, Deserialize)]
pub struct TopPerformersQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/cycles/{id}/reports/departments (manager)
///
/// Mean scores per department over approved reviews.
pub async fn department_scores(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(cycle_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<DepartmentScore>>>> {
    ensure_cycle_exists(&state, cycle_id).await?;
    let scores = ReportRepo::department_scores(&state.pool, cycle_id).await?;
    Ok(Json(DataResponse { data: scores }))
}

/// GET /api/v1/cycles/{id}/reports/top-performers?limit=N (manager)
///
/// Reviewees ranked by mean performance score across all reviews.
pub async fn top_performers(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(cycle_id): Path<DbId>,
    Query(query): Query<TopPerformersQuery>,
) -> AppResult<Json<DataResponse<Vec<TopPerformer>>>> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_PERFORMERS_LIMIT);
    if limit < 1 {
        return Err(AppError::BadRequest("limit must be at least 1".into()));
    }

    ensure_cycle_exists(&state, cycle_id).await?;
    let performers = ReportRepo::top_performers(&state.pool, cycle_id, limit).await?;
    Ok(Json(DataResponse { data: performers }))
}

/// GET /api/v1/cycles/{id}/reports/completion (manager)
pub async fn completion_status(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(cycle_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CompletionStatus>>> {
    let status = ReportRepo::completion_status(&state.pool, cycle_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ReviewCycle",
            id: cycle_id,
        })?;
    Ok(Json(DataResponse { data: status }))
}

/// GET /api/v1/cycles/{id}/reports/training-recommendations (manager)
pub async fn training_recommendations(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(cycle_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TrainingRecommendationCount>>>> {
    ensure_cycle_exists(&state, cycle_id).await?;
    let tally = ReportRepo::training_recommendations(&state.pool, cycle_id).await?;
    Ok(Json(DataResponse { data: tally }))
}

/// GET /api/v1/cycles/{id}/reports/improvement-areas (manager)
pub async fn improvement_areas(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(cycle_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ImprovementAreaCount>>>> {
    ensure_cycle_exists(&state, cycle_id).await?;
    let tally = ReportRepo::improvement_areas(&state.pool, cycle_id).await?;
    Ok(Json(DataResponse { data: tally }))
}

/// 404 for reports against a cycle id that does not exist.
async fn ensure_cycle_exists(state: &AppState, cycle_id: DbId) -> AppResult<()> {
    if CycleRepo::find_by_id(&state.pool, cycle_id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "ReviewCycle",
            id: cycle_id,
        }
        .into());
    }
    Ok(())
}
