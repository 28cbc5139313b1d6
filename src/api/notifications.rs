//! Notification endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::notification::Notification, AppState};

use super::AuthenticatedUser;

/// Unread notification count
#[derive(Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

/// Result of marking all notifications read
#[derive(Serialize, ToSchema)]
pub struct MarkAllReadResponse {
    pub marked: u64,
}

/// List the caller's most recent notifications
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications", body = Vec<Notification>)
    )
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state.services.notifications.list(claims.user_id).await?;
    Ok(Json(notifications))
}

/// Number of unread notifications, for the bell badge
#[utoipa::path(
    get,
    path = "/notifications/unread-count",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse)
    )
)]
pub async fn unread_count(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UnreadCountResponse>> {
    let unread_count = state
        .services
        .notifications
        .unread_count(claims.user_id)
        .await?;
    Ok(Json(UnreadCountResponse { unread_count }))
}

/// Mark one notification read
#[utoipa::path(
    patch,
    path = "/notifications/{id}/read",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read", body = Notification),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Notification>> {
    let notification = state
        .services
        .notifications
        .mark_read(id, claims.user_id)
        .await?;
    Ok(Json(notification))
}

/// Mark all of the caller's notifications read
#[utoipa::path(
    post,
    path = "/notifications/mark-all-read",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications marked read", body = MarkAllReadResponse)
    )
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<MarkAllReadResponse>> {
    let marked = state
        .services
        .notifications
        .mark_all_read(claims.user_id)
        .await?;
    Ok(Json(MarkAllReadResponse { marked }))
}
