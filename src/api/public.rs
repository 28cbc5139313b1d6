//! Public endpoints: the no-account booking flow

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::BookingListItem,
        court::CourtShort,
        schedule::{AvailableSlot, ScheduleEcho},
    },
    AppState,
};

/// Slot grid query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct SlotsQuery {
    pub date: NaiveDate,
    pub court_id: Option<i32>,
}

/// Slot grid for one date
#[derive(Serialize, ToSchema)]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub schedule: ScheduleEcho,
    pub courts: Vec<CourtShort>,
    pub slots: Vec<AvailableSlot>,
}

/// Public reservation request
#[derive(Deserialize, Validate, ToSchema)]
pub struct PublicBookingRequest {
    pub court: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 50))]
    pub customer_phone: String,
    #[validate(email)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Public reservation response, with the cancellation code
#[derive(Serialize, ToSchema)]
pub struct PublicBookingResponse {
    pub id: i32,
    pub court: i32,
    pub court_name: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub customer_name: String,
    pub cancellation_token: String,
    pub message: String,
}

/// Cancellation code verification response
#[derive(Serialize, ToSchema)]
pub struct VerifyTokenResponse {
    pub booking_id: i32,
    pub court_name: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub customer_name: String,
    pub status: String,
    pub can_cancel: bool,
    pub hours_until_booking: f64,
    pub min_cancellation_hours: i32,
}

/// Cancellation response
#[derive(Serialize, ToSchema)]
pub struct CancelResponse {
    pub booking_id: i32,
    pub status: String,
    pub message: String,
}

/// Token verification query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifyQuery {
    pub token: Option<String>,
}

/// Cancel-by-token request body
#[derive(Deserialize, ToSchema)]
pub struct CancelRequest {
    pub token: String,
}

/// Cancel-by-id request body
#[derive(Deserialize, ToSchema)]
pub struct CancelByIdRequest {
    pub booking_id: i32,
}

/// Booking search query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// One search result, with its cancellation window resolved
#[derive(Serialize, ToSchema)]
pub struct SearchResult {
    #[serde(flatten)]
    pub booking: BookingListItem,
    pub can_cancel: bool,
}

/// Search response envelope
#[derive(Serialize, ToSchema)]
pub struct SearchResponse {
    pub bookings: Vec<SearchResult>,
}

/// Active courts, for the booking wizard's court picker
#[utoipa::path(
    get,
    path = "/public/courts",
    tag = "public",
    responses(
        (status = 200, description = "Active courts", body = Vec<CourtShort>)
    )
)]
pub async fn courts(State(state): State<AppState>) -> AppResult<Json<Vec<CourtShort>>> {
    let courts = state.services.public.active_courts().await?;
    Ok(Json(
        courts
            .into_iter()
            .map(|c| CourtShort {
                id: c.id,
                name: c.name,
                court_type: c.court_type,
                price: c.price,
                is_active: c.is_active,
            })
            .collect(),
    ))
}

/// Public schedule configuration echo
#[utoipa::path(
    get,
    path = "/public/configuration",
    tag = "public",
    responses(
        (status = 200, description = "Schedule parameters", body = ScheduleEcho)
    )
)]
pub async fn configuration(State(state): State<AppState>) -> AppResult<Json<ScheduleEcho>> {
    let config = state.services.schedule.get().await?;
    Ok(Json(ScheduleEcho::from(&config)))
}

/// Available slots for one date across all active courts
#[utoipa::path(
    get,
    path = "/public/available-slots",
    tag = "public",
    params(SlotsQuery),
    responses(
        (status = 200, description = "Slot grid", body = SlotsResponse),
        (status = 400, description = "Past date")
    )
)]
pub async fn available_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotsQuery>,
) -> AppResult<Json<SlotsResponse>> {
    let (config, courts, slots) = state
        .services
        .public
        .slots(query.date, query.court_id)
        .await?;

    Ok(Json(SlotsResponse {
        date: query.date,
        schedule: ScheduleEcho::from(&config),
        courts: courts
            .into_iter()
            .map(|c| CourtShort {
                id: c.id,
                name: c.name,
                court_type: c.court_type,
                price: c.price,
                is_active: c.is_active,
            })
            .collect(),
        slots,
    }))
}

/// Reserve a slot without an account
#[utoipa::path(
    post,
    path = "/public/bookings",
    tag = "public",
    request_body = PublicBookingRequest,
    responses(
        (status = 201, description = "Reservation confirmed", body = PublicBookingResponse),
        (status = 400, description = "Invalid data or slot in the past"),
        (status = 409, description = "Slot no longer available")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<PublicBookingRequest>,
) -> AppResult<(StatusCode, Json<PublicBookingResponse>)> {
    request.validate()?;

    let created = state
        .services
        .public
        .create_booking(
            request.court,
            request.date,
            request.start_time,
            &request.customer_name,
            &request.customer_phone,
            request.customer_email.as_deref().unwrap_or(""),
            &request.notes,
        )
        .await?;

    let code = created.token.token.clone();
    Ok((
        StatusCode::CREATED,
        Json(PublicBookingResponse {
            id: created.booking.id,
            court: created.booking.court_id,
            court_name: created.court_name,
            date: created.booking.date,
            start_time: created.booking.start_time.format("%H:%M").to_string(),
            end_time: created.booking.end_time.format("%H:%M").to_string(),
            customer_name: created.booking.customer_name,
            cancellation_token: created.token.token,
            message: format!(
                "Reserva confirmada. Tu código de cancelación es {}",
                code
            ),
        }),
    ))
}

/// Find upcoming reservations by name or phone
#[utoipa::path(
    get,
    path = "/public/bookings/search",
    tag = "public",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching reservations", body = SearchResponse),
        (status = 400, description = "Missing name and phone")
    )
)]
pub async fn search_bookings(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let matches = state
        .services
        .public
        .search_bookings(query.name.as_deref(), query.phone.as_deref())
        .await?;

    Ok(Json(SearchResponse {
        bookings: matches
            .into_iter()
            .map(|m| SearchResult {
                booking: m.item,
                can_cancel: m.can_cancel,
            })
            .collect(),
    }))
}

/// Check a cancellation code
#[utoipa::path(
    get,
    path = "/public/bookings/verify",
    tag = "public",
    params(VerifyQuery),
    responses(
        (status = 200, description = "Reservation found", body = VerifyTokenResponse),
        (status = 400, description = "Missing token parameter"),
        (status = 404, description = "Invalid code")
    )
)]
pub async fn verify_token(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> AppResult<Json<VerifyTokenResponse>> {
    let token = query.token.ok_or_else(|| {
        AppError::BadRequest("El parámetro token es obligatorio".to_string())
    })?;
    let verification = state.services.public.verify_token(&token).await?;
    let booking = verification.booking;

    Ok(Json(VerifyTokenResponse {
        booking_id: booking.id,
        court_name: verification.court_name,
        date: booking.date,
        start_time: booking.start_time.format("%H:%M").to_string(),
        end_time: booking.end_time.format("%H:%M").to_string(),
        customer_name: booking.customer_name,
        status: booking.status.label().to_string(),
        can_cancel: verification.can_cancel,
        hours_until_booking: verification.hours_until_booking,
        min_cancellation_hours: verification.min_cancellation_hours,
    }))
}

/// Cancel a reservation with its cancellation code
#[utoipa::path(
    post,
    path = "/public/bookings/cancel",
    tag = "public",
    request_body = CancelRequest,
    responses(
        (status = 200, description = "Reservation cancelled", body = CancelResponse),
        (status = 400, description = "Inside the cancellation window or wrong status"),
        (status = 404, description = "Invalid code")
    )
)]
pub async fn cancel_by_token(
    State(state): State<AppState>,
    Json(request): Json<CancelRequest>,
) -> AppResult<Json<CancelResponse>> {
    let booking = state.services.public.cancel_by_token(&request.token).await?;
    Ok(Json(CancelResponse {
        booking_id: booking.id,
        status: booking.status.as_str().to_string(),
        message: "Reserva cancelada correctamente".to_string(),
    }))
}

/// Cancel a reservation by booking ID
#[utoipa::path(
    post,
    path = "/public/bookings/cancel-by-id",
    tag = "public",
    request_body = CancelByIdRequest,
    responses(
        (status = 200, description = "Reservation cancelled", body = CancelResponse),
        (status = 400, description = "Inside the cancellation window or wrong status"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_by_id(
    State(state): State<AppState>,
    Json(request): Json<CancelByIdRequest>,
) -> AppResult<Json<CancelResponse>> {
    let booking = state.services.public.cancel_booking(request.booking_id).await?;
    Ok(Json(CancelResponse {
        booking_id: booking.id,
        status: booking.status.as_str().to_string(),
        message: "Reserva cancelada correctamente".to_string(),
    }))
}
