//! Scheduling configuration endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::schedule::{TimeSlotConfig, UpdateTimeSlotConfig},
    AppState,
};

use super::AuthenticatedUser;

/// Current slot configuration
#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Slot configuration", body = TimeSlotConfig)
    )
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<TimeSlotConfig>> {
    let config = state.services.schedule.get().await?;
    Ok(Json(config))
}

/// Update the slot configuration (admin only)
#[utoipa::path(
    patch,
    path = "/config",
    tag = "config",
    security(("bearer_auth" = [])),
    request_body = UpdateTimeSlotConfig,
    responses(
        (status = 200, description = "Configuration updated", body = TimeSlotConfig),
        (status = 400, description = "Invalid configuration"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpdateTimeSlotConfig>,
) -> AppResult<Json<TimeSlotConfig>> {
    claims.require_admin()?;
    let config = state.services.schedule.update(&request).await?;
    Ok(Json(config))
}
