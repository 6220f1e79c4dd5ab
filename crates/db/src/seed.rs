//! Startup seed helpers.

use fullcircle_core::roles::ROLE_ADMIN;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};
use crate::repositories::UserRepo;

/// Create the bootstrap admin account if no admin exists yet.
///
/// Returns `None` when an admin is already present. The password in
/// `input` must arrive pre-hashed.
pub async fn ensure_default_admin(
    pool: &PgPool,
    input: &CreateUser,
) -> Result<Option<User>, sqlx::Error> {
    if UserRepo::any_with_role(pool, ROLE_ADMIN).await? {
        return Ok(None);
    }

    let user = UserRepo::create(pool, input).await?;
    tracing::info!(user_id = user.id, username = %user.username, "Seeded default admin user");
    Ok(Some(user))
}
