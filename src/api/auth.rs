//! Authentication endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{UpdateProfile, UserInfo},
    AppState,
};

use super::AuthenticatedUser;

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response with JWT token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user: UserInfo,
}

/// Log a staff user in
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state
        .services
        .auth
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        user,
    }))
}

/// Current user info
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UserInfo>> {
    let user = state.services.auth.get_user(claims.user_id).await?;
    Ok(Json(user))
}

/// Update own profile
#[utoipa::path(
    patch,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = UserInfo),
        (status = 400, description = "Invalid data"),
        (status = 401, description = "Wrong current password")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpdateProfile>,
) -> AppResult<Json<UserInfo>> {
    request.validate()?;
    let user = state
        .services
        .auth
        .update_profile(claims.user_id, &request)
        .await?;
    Ok(Json(user))
}
