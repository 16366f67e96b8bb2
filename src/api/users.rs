//! User management endpoints

use axum::{extract::State, Json};

use crate::{
    error::{AppResult, ErrorResponse},
    models::user::UserSummary,
};

use super::AuthenticatedUser;

/// List every registered account
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All accounts in registration order", body = Vec<UserSummary>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin capability required", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<UserSummary>>> {
    claims.require_admin()?;
    let users = state.services.users.list().await?;
    Ok(Json(users))
}
