//! Report endpoints: daily cash summary and booking history

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::report::{DailySummary, HistoryItem, HistoryQuery},
    AppState,
};

use super::AuthenticatedUser;

/// Daily summary query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DailySummaryQuery {
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

/// Billing summary for one day
#[utoipa::path(
    get,
    path = "/reports/daily-summary",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(DailySummaryQuery),
    responses(
        (status = 200, description = "Daily summary", body = DailySummary)
    )
)]
pub async fn daily_summary(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<DailySummaryQuery>,
) -> AppResult<Json<DailySummary>> {
    let summary = state.services.reports.daily_summary(query.date).await?;
    Ok(Json(summary))
}

/// Booking history with optional filters, newest first
#[utoipa::path(
    get,
    path = "/reports/history",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(HistoryQuery),
    responses(
        (status = 200, description = "Booking history", body = Vec<HistoryItem>)
    )
)]
pub async fn history(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<HistoryItem>>> {
    let items = state.services.reports.history(&query).await?;
    Ok(Json(items))
}
