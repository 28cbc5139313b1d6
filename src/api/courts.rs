//! Court management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::court::{Court, CourtQuery, CreateCourt, UpdateCourt, UpdateCourtPrice},
    AppState,
};

use super::AuthenticatedUser;

/// List courts
#[utoipa::path(
    get,
    path = "/courts",
    tag = "courts",
    security(("bearer_auth" = [])),
    params(CourtQuery),
    responses(
        (status = 200, description = "Courts", body = Vec<Court>)
    )
)]
pub async fn list_courts(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(mut query): Query<CourtQuery>,
) -> AppResult<Json<Vec<Court>>> {
    // Reception staff only see active courts
    if !claims.is_admin() {
        query.is_active = Some(true);
    }
    let courts = state.services.courts.list(&query).await?;
    Ok(Json(courts))
}

/// Get one court
#[utoipa::path(
    get,
    path = "/courts/{id}",
    tag = "courts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Court ID")),
    responses(
        (status = 200, description = "Court", body = Court),
        (status = 404, description = "Court not found")
    )
)]
pub async fn get_court(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Court>> {
    let court = state.services.courts.get(id).await?;
    Ok(Json(court))
}

/// Create a court (admin only)
#[utoipa::path(
    post,
    path = "/courts",
    tag = "courts",
    security(("bearer_auth" = [])),
    request_body = CreateCourt,
    responses(
        (status = 201, description = "Court created", body = Court),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Court name already exists")
    )
)]
pub async fn create_court(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateCourt>,
) -> AppResult<(StatusCode, Json<Court>)> {
    claims.require_admin()?;
    let court = state.services.courts.create(&request).await?;
    Ok((StatusCode::CREATED, Json(court)))
}

/// Update a court (admin only)
#[utoipa::path(
    put,
    path = "/courts/{id}",
    tag = "courts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Court ID")),
    request_body = UpdateCourt,
    responses(
        (status = 200, description = "Court updated", body = Court),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Court not found")
    )
)]
pub async fn update_court(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateCourt>,
) -> AppResult<Json<Court>> {
    claims.require_admin()?;
    let court = state.services.courts.update(id, &request).await?;
    Ok(Json(court))
}

/// Toggle a court's active flag (admin only)
#[utoipa::path(
    patch,
    path = "/courts/{id}/toggle_active",
    tag = "courts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Court ID")),
    responses(
        (status = 200, description = "Court toggled", body = Court),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Court not found")
    )
)]
pub async fn toggle_court_active(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Court>> {
    claims.require_admin()?;
    let court = state.services.courts.toggle_active(id).await?;
    Ok(Json(court))
}

/// All courts with prices, for the configuration screen (admin only)
#[utoipa::path(
    get,
    path = "/config/courts",
    tag = "config",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Courts with prices", body = Vec<Court>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_config_courts(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Court>>> {
    claims.require_admin()?;
    let courts = state.services.courts.list(&CourtQuery::default()).await?;
    Ok(Json(courts))
}

/// Update only the court's price (admin only)
#[utoipa::path(
    patch,
    path = "/config/courts/{id}/price",
    tag = "config",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Court ID")),
    request_body = UpdateCourtPrice,
    responses(
        (status = 200, description = "Price updated", body = Court),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Court not found")
    )
)]
pub async fn update_court_price(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateCourtPrice>,
) -> AppResult<Json<Court>> {
    claims.require_admin()?;
    let court = state.services.courts.update_price(id, request.price).await?;
    Ok(Json(court))
}
