//! Consumption endpoints: bar items charged to a booking

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::product::{Consumption, ConsumptionDetails, ConsumptionQuery, CreateConsumption},
    AppState,
};

use super::AuthenticatedUser;

/// List consumptions, optionally filtered by booking or product
#[utoipa::path(
    get,
    path = "/consumptions",
    tag = "consumptions",
    security(("bearer_auth" = [])),
    params(ConsumptionQuery),
    responses(
        (status = 200, description = "Consumptions", body = Vec<ConsumptionDetails>)
    )
)]
pub async fn list_consumptions(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ConsumptionQuery>,
) -> AppResult<Json<Vec<ConsumptionDetails>>> {
    let consumptions = state.services.products.list_consumptions(&query).await?;
    Ok(Json(consumptions))
}

/// Register a consumption on a booking
#[utoipa::path(
    post,
    path = "/consumptions",
    tag = "consumptions",
    security(("bearer_auth" = [])),
    request_body = CreateConsumption,
    responses(
        (status = 201, description = "Consumption registered", body = Consumption),
        (status = 400, description = "Invalid quantity, wrong booking status or insufficient stock"),
        (status = 404, description = "Booking or product not found")
    )
)]
pub async fn create_consumption(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<CreateConsumption>,
) -> AppResult<(StatusCode, Json<Consumption>)> {
    let consumption = state.services.products.create_consumption(&request).await?;
    Ok((StatusCode::CREATED, Json(consumption)))
}

/// Delete a consumption, restoring stock
#[utoipa::path(
    delete,
    path = "/consumptions/{id}",
    tag = "consumptions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Consumption ID")),
    responses(
        (status = 204, description = "Consumption deleted"),
        (status = 404, description = "Consumption not found")
    )
)]
pub async fn delete_consumption(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.products.delete_consumption(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
