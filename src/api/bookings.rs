//! Booking management endpoints (admin panel)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        booking::{
            BookingDetails, BookingListItem, BookingQuery, CalendarEntry, CalendarQuery,
            CreateBooking, UpdateBooking,
        },
        closure::{CloseBooking, ClosureDetails},
    },
    AppState,
};

use super::AuthenticatedUser;

/// List bookings with optional filters
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(BookingQuery),
    responses(
        (status = 200, description = "Bookings", body = Vec<BookingListItem>)
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<BookingListItem>>> {
    let bookings = state.services.bookings.list(&query).await?;
    Ok(Json(bookings))
}

/// Calendar view; defaults to the current week starting on Monday
#[utoipa::path(
    get,
    path = "/bookings/calendar",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(CalendarQuery),
    responses(
        (status = 200, description = "Calendar entries", body = Vec<CalendarEntry>)
    )
)]
pub async fn calendar(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<Vec<CalendarEntry>>> {
    let entries = state.services.bookings.calendar(&query).await?;
    Ok(Json(entries))
}

/// Get one booking with full details
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get_details(id).await?;
    Ok(Json(booking))
}

/// Create a booking from the admin panel
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = BookingDetails),
        (status = 400, description = "Invalid data"),
        (status = 409, description = "Slot already taken")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let booking = state
        .services
        .bookings
        .create(&request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Partially update a booking
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateBooking,
    responses(
        (status = 200, description = "Booking updated", body = BookingDetails),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Slot already taken")
    )
)]
pub async fn update_booking(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateBooking>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.update(id, &request).await?;
    Ok(Json(booking))
}

/// Cancel a booking
#[utoipa::path(
    patch,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingDetails),
        (status = 400, description = "Booking cannot be cancelled"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.cancel(id).await?;
    Ok(Json(booking))
}

/// Close a reserved booking, recording the payment
#[utoipa::path(
    post,
    path = "/bookings/{id}/close",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = CloseBooking,
    responses(
        (status = 201, description = "Booking closed", body = ClosureDetails),
        (status = 400, description = "Payment split mismatch or wrong status"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn close_booking(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<CloseBooking>,
) -> AppResult<(StatusCode, Json<ClosureDetails>)> {
    let closure = state
        .services
        .bookings
        .close(id, &request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ClosureDetails::from(closure))))
}

/// Get the closure of a booking
#[utoipa::path(
    get,
    path = "/bookings/{id}/closure",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Closure details", body = ClosureDetails),
        (status = 404, description = "Booking has no closure")
    )
)]
pub async fn get_closure(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ClosureDetails>> {
    let closure = state.services.bookings.get_closure(id).await?;
    Ok(Json(ClosureDetails::from(closure)))
}
