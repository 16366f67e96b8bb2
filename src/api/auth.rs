//! Registration and login endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppResult, ErrorResponse},
    models::user::Role,
};

use super::ValidatedJson;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 4, message = "password must be at least 4 characters"))]
    pub password: String,
    /// Defaults to operator when omitted
    pub role: Option<Role>,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    pub ok: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct UserInfo {
    pub username: String,
    pub role: Role,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub ok: bool,
    /// Bearer token for subsequent requests
    pub token: String,
    pub user: UserInfo,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    state
        .services
        .users
        .register(
            &request.username,
            &request.email,
            &request.password,
            request.role,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { ok: true })))
}

/// Log in and receive a session token
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state
        .services
        .users
        .authenticate(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        ok: true,
        token,
        user: UserInfo {
            username: user.username,
            role: user.role,
        },
    }))
}
