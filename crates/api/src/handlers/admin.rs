//! Handlers for the `/admin/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fullcircle_core::roles::validate_role;
use fullcircle_db::models::user::{CreateUser, UserResponse};
use fullcircle_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/users`. The password arrives in plaintext
/// and is hashed before storage.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub department: Option<String>,
    pub role: String,
}

/// POST /api/v1/admin/users (admin)
///
/// Create a user account. Duplicate usernames and emails surface as 409
/// through the unique constraints.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    validate_role(&input.role)?;
    validate_password_strength(&input.password).map_err(AppError::BadRequest)?;

    if input.username.trim().is_empty() || input.full_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "username and full_name must not be blank".into(),
        ));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            full_name: input.full_name,
            department: input.department,
            role: input.role,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        username = %user.username,
        role = %user.role,
        created_by = admin.user_id,
        "User created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: user.into() }),
    ))
}

/// GET /api/v1/admin/users (admin)
///
/// List all users, grouped by department then name.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}
