//! Bookings service: admin-side booking lifecycle

use chrono::{Datelike, Duration, NaiveDate, Utc};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{
            Booking, BookingDetails, BookingListItem, BookingQuery, CalendarEntry, CalendarQuery,
            CreateBooking, UpdateBooking,
        },
        closure::{BookingClosure, CloseBooking},
        court::CourtShort,
        enums::{BookingOrigin, BookingStatus},
    },
    repository::Repository,
};

pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &BookingQuery) -> AppResult<Vec<BookingListItem>> {
        self.repository.bookings.list(query).await
    }

    pub async fn get_details(&self, id: i32) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(id).await?;
        self.details_for(booking).await
    }

    /// Create a booking from the admin panel
    pub async fn create(&self, data: &CreateBooking, created_by: i32) -> AppResult<BookingDetails> {
        data.validate()?;
        self.check_schedule(data.court, data.date, data.start_time, data.end_time, None)
            .await?;

        let booking = self
            .repository
            .bookings
            .create(data, "", BookingOrigin::Admin, Some(created_by))
            .await?;
        self.details_for(booking).await
    }

    /// Partially update a booking, re-checking overlap when the schedule moves
    pub async fn update(&self, id: i32, data: &UpdateBooking) -> AppResult<BookingDetails> {
        data.validate()?;
        let current = self.repository.bookings.get_by_id(id).await?;

        if data.touches_schedule() {
            let court = data.court.unwrap_or(current.court_id);
            let date = data.date.unwrap_or(current.date);
            let start = data.start_time.unwrap_or(current.start_time);
            let end = data.end_time.unwrap_or(current.end_time);
            self.check_schedule(court, date, start, end, Some(id)).await?;
        }

        let booking = self.repository.bookings.update(id, data).await?;
        self.details_for(booking).await
    }

    /// Cancel a booking; only open bookings can be cancelled
    pub async fn cancel(&self, id: i32) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(id).await?;
        if !booking.can_be_cancelled() {
            return Err(AppError::BusinessRule(format!(
                "No se puede cancelar un turno con estado {}",
                booking.status.label()
            )));
        }

        let booking = self
            .repository
            .bookings
            .set_status(id, BookingStatus::Cancelled)
            .await?;
        self.details_for(booking).await
    }

    /// Close a reserved booking, recording the settlement
    pub async fn close(
        &self,
        id: i32,
        data: &CloseBooking,
        closed_by: i32,
    ) -> AppResult<BookingClosure> {
        self.repository
            .bookings
            .close(
                id,
                data.booking_amount,
                data.cash_amount,
                data.transfer_amount,
                &data.notes,
                Some(closed_by),
            )
            .await
    }

    pub async fn get_closure(&self, booking_id: i32) -> AppResult<BookingClosure> {
        self.repository
            .bookings
            .get_closure(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Este turno no tiene cierre".to_string()))
    }

    /// Calendar entries; without an explicit range, the current week starting
    /// on Monday.
    pub async fn calendar(&self, query: &CalendarQuery) -> AppResult<Vec<CalendarEntry>> {
        let (date_from, date_to) = match (query.date_from, query.date_to) {
            (Some(from), Some(to)) => (from, to),
            (Some(from), None) => (from, from + Duration::days(6)),
            (None, Some(to)) => (to - Duration::days(6), to),
            (None, None) => current_week(Utc::now().date_naive()),
        };

        self.repository
            .bookings
            .calendar(date_from, date_to, query.court)
            .await
    }

    async fn details_for(&self, booking: Booking) -> AppResult<BookingDetails> {
        let court = self.repository.courts.get_by_id(booking.court_id).await?;
        let closure = self.repository.bookings.get_closure(booking.id).await?;
        let court_short = CourtShort {
            id: court.id,
            name: court.name,
            court_type: court.court_type,
            price: court.price,
            is_active: court.is_active,
        };
        Ok(BookingDetails::new(booking, court_short, closure))
    }

    /// Shared schedule validation for create and update
    async fn check_schedule(
        &self,
        court_id: i32,
        date: NaiveDate,
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
        exclude: Option<i32>,
    ) -> AppResult<()> {
        if end <= start {
            return Err(AppError::Validation(
                "La hora de fin debe ser posterior a la hora de inicio".to_string(),
            ));
        }

        let court = self.repository.courts.get_by_id(court_id).await?;
        if !court.is_active {
            return Err(AppError::BusinessRule(
                "No se pueden crear turnos en una cancha inactiva".to_string(),
            ));
        }

        if self
            .repository
            .bookings
            .has_overlap(court_id, date, start, end, exclude)
            .await?
        {
            return Err(AppError::Conflict(
                "Ya existe un turno en este horario para esta cancha".to_string(),
            ));
        }

        Ok(())
    }
}

/// Monday through Sunday of the week containing `today`
pub fn current_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    (monday, monday + Duration::days(6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_starts_on_monday() {
        // 2026-08-26 is a Wednesday
        let (from, to) = current_week(NaiveDate::from_ymd_opt(2026, 8, 26).unwrap());
        assert_eq!(from, NaiveDate::from_ymd_opt(2026, 8, 24).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2026, 8, 30).unwrap());
    }

    #[test]
    fn monday_maps_to_itself() {
        let monday = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let (from, _) = current_week(monday);
        assert_eq!(from, monday);
    }

    #[test]
    fn sunday_belongs_to_the_ending_week() {
        let sunday = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let (from, to) = current_week(sunday);
        assert_eq!(from, NaiveDate::from_ymd_opt(2026, 8, 24).unwrap());
        assert_eq!(to, sunday);
    }
}
