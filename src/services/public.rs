//! Public booking flow: slots, reservations and token-based cancellation

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingListItem, CreateBooking},
        court::Court,
        enums::{BookingOrigin, BookingStatus, NotificationType},
        notification::NotifyAdmins,
        schedule::{AvailableSlot, TimeSlotConfig},
        token::CancellationToken,
    },
    repository::Repository,
    services::slots::build_slots,
};

const SLOT_GONE: &str = "Este horario ya no está disponible. Por favor elegí otro.";

/// A freshly created public reservation
pub struct PublicBookingCreated {
    pub booking: Booking,
    pub court_name: String,
    pub token: CancellationToken,
}

/// A reservation found by the public search, with its cancellation window
pub struct ReservationMatch {
    pub item: BookingListItem,
    pub can_cancel: bool,
}

/// Result of verifying a cancellation code
pub struct TokenVerification {
    pub booking: Booking,
    pub court_name: String,
    pub can_cancel: bool,
    pub hours_until_booking: f64,
    pub min_cancellation_hours: i32,
}

pub struct PublicService {
    repository: Repository,
}

impl PublicService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Slot grid for one date, across all active courts or a single one
    pub async fn slots(
        &self,
        date: NaiveDate,
        court_id: Option<i32>,
    ) -> AppResult<(TimeSlotConfig, Vec<Court>, Vec<AvailableSlot>)> {
        let now = Utc::now().naive_utc();
        if date < now.date() {
            return Err(AppError::BadRequest(
                "No se pueden ver horarios de fechas pasadas".to_string(),
            ));
        }

        let config = self.repository.schedule.get_active().await?;
        let mut courts = self.repository.courts.list_active().await?;
        if let Some(court_id) = court_id {
            courts.retain(|c| c.id == court_id);
        }
        let busy = self.repository.bookings.busy_intervals(date).await?;
        let slots = build_slots(&config, &courts, &busy, date, now);
        Ok((config, courts, slots))
    }

    /// Active courts for the public court picker
    pub async fn active_courts(&self) -> AppResult<Vec<Court>> {
        self.repository.courts.list_active().await
    }

    /// Reserve a slot without an account. The end time comes from the
    /// configured slot duration; admins get notified.
    pub async fn create_booking(
        &self,
        court_id: i32,
        date: NaiveDate,
        start_time: NaiveTime,
        customer_name: &str,
        customer_phone: &str,
        customer_email: &str,
        notes: &str,
    ) -> AppResult<PublicBookingCreated> {
        let court = self.repository.courts.get_by_id(court_id).await?;
        if !court.is_active {
            return Err(AppError::NotFound("Cancha no encontrada".to_string()));
        }

        let config = self.repository.schedule.get_active().await?;
        let end_time = start_time + Duration::minutes(config.slot_duration_minutes as i64);

        let now = Utc::now().naive_utc();
        if NaiveDateTime::new(date, start_time) < now {
            return Err(AppError::BusinessRule(SLOT_GONE.to_string()));
        }
        if self
            .repository
            .bookings
            .has_overlap(court_id, date, start_time, end_time, None)
            .await?
        {
            return Err(AppError::Conflict(SLOT_GONE.to_string()));
        }

        let data = CreateBooking {
            court: court_id,
            date,
            start_time,
            end_time,
            customer_name: customer_name.to_string(),
            customer_phone: customer_phone.to_string(),
            notes: notes.to_string(),
        };
        let booking = self
            .repository
            .bookings
            .create(&data, customer_email, BookingOrigin::Public, None)
            .await?;
        let token = self.repository.bookings.create_token(booking.id).await?;

        self.notify_new_booking(&booking, &court.name).await?;

        Ok(PublicBookingCreated {
            booking,
            court_name: court.name,
            token,
        })
    }

    /// Check a cancellation code: who booked, and whether it can still be
    /// cancelled within the configured window.
    pub async fn verify_token(&self, code: &str) -> AppResult<TokenVerification> {
        let token = self.repository.bookings.get_token(code).await?;
        let booking = self.repository.bookings.get_by_id(token.booking_id).await?;
        let court = self.repository.courts.get_by_id(booking.court_id).await?;
        let config = self.repository.schedule.get_active().await?;

        let hours = hours_until(&booking, Utc::now().naive_utc());
        let can_cancel =
            booking.can_be_cancelled() && hours >= config.min_cancellation_hours as f64;

        Ok(TokenVerification {
            booking,
            court_name: court.name,
            can_cancel,
            hours_until_booking: round_hours(hours),
            min_cancellation_hours: config.min_cancellation_hours,
        })
    }

    /// Cancel a booking with its cancellation code
    pub async fn cancel_by_token(&self, code: &str) -> AppResult<Booking> {
        let token = self.repository.bookings.get_token(code).await?;
        self.cancel_booking(token.booking_id).await
    }

    /// Cancel a public booking by ID, enforcing the cancellation window
    pub async fn cancel_booking(&self, booking_id: i32) -> AppResult<Booking> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        if !booking.can_be_cancelled() {
            return Err(AppError::BusinessRule(format!(
                "No se puede cancelar un turno con estado {}",
                booking.status.label()
            )));
        }

        let config = self.repository.schedule.get_active().await?;
        let hours = hours_until(&booking, Utc::now().naive_utc());
        if hours < config.min_cancellation_hours as f64 {
            return Err(AppError::BusinessRule(format!(
                "No se puede cancelar con menos de {} horas de anticipación. \
                 Contactá al club directamente.",
                config.min_cancellation_hours
            )));
        }

        let cancelled = self
            .repository
            .bookings
            .set_status(booking_id, BookingStatus::Cancelled)
            .await?;

        let court = self.repository.courts.get_by_id(cancelled.court_id).await?;
        self.notify_cancellation(&cancelled, &court.name).await?;

        Ok(cancelled)
    }

    /// Find upcoming reserved bookings by customer name or phone
    pub async fn search_bookings(
        &self,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> AppResult<Vec<ReservationMatch>> {
        let name = name.map(str::trim).filter(|s| !s.is_empty());
        let phone = phone.map(str::trim).filter(|s| !s.is_empty());
        if name.is_none() && phone.is_none() {
            return Err(AppError::BadRequest(
                "Se requiere nombre o teléfono para buscar".to_string(),
            ));
        }

        let now = Utc::now().naive_utc();
        let config = self.repository.schedule.get_active().await?;
        let items = self
            .repository
            .bookings
            .search_reserved(name, phone, now.date())
            .await?;

        Ok(items
            .into_iter()
            .map(|item| {
                let hours = hours_until_start(item.date, item.start_time, now);
                ReservationMatch {
                    can_cancel: hours >= config.min_cancellation_hours as f64,
                    item,
                }
            })
            .collect())
    }

    async fn notify_new_booking(&self, booking: &Booking, court_name: &str) -> AppResult<()> {
        let admin_ids = self.repository.users.admin_ids().await?;
        let payload = NotifyAdmins {
            title: "Nueva reserva online".to_string(),
            message: format!(
                "{} reservó {} el {} de {} a {}",
                booking.customer_name,
                court_name,
                booking.date.format("%d/%m/%Y"),
                booking.start_time.format("%H:%M"),
                booking.end_time.format("%H:%M"),
            ),
            notification_type: NotificationType::BookingCreated,
            booking_id: Some(booking.id),
        };
        self.repository
            .notifications
            .notify_admins(&admin_ids, &payload)
            .await
    }

    async fn notify_cancellation(&self, booking: &Booking, court_name: &str) -> AppResult<()> {
        let admin_ids = self.repository.users.admin_ids().await?;
        let payload = NotifyAdmins {
            title: "Reserva cancelada".to_string(),
            message: format!(
                "{} canceló {} el {} de {} a {}",
                booking.customer_name,
                court_name,
                booking.date.format("%d/%m/%Y"),
                booking.start_time.format("%H:%M"),
                booking.end_time.format("%H:%M"),
            ),
            notification_type: NotificationType::BookingCancelled,
            booking_id: Some(booking.id),
        };
        self.repository
            .notifications
            .notify_admins(&admin_ids, &payload)
            .await
    }
}

/// Exact hours from `now` until the booking starts. Negative when the
/// booking already started. The cancellation gate compares this value;
/// rounding happens only in responses via `round_hours`.
pub fn hours_until(booking: &Booking, now: NaiveDateTime) -> f64 {
    hours_until_start(booking.date, booking.start_time, now)
}

fn hours_until_start(date: NaiveDate, start_time: NaiveTime, now: NaiveDateTime) -> f64 {
    let start = NaiveDateTime::new(date, start_time);
    (start - now).num_seconds() as f64 / 3600.0
}

/// One-decimal rounding for display
pub fn round_hours(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::BookingStatus;
    use chrono::NaiveTime;

    fn booking_at(date: NaiveDate, time: NaiveTime) -> Booking {
        Booking {
            id: 1,
            court_id: 1,
            date,
            start_time: time,
            end_time: time + Duration::minutes(90),
            status: BookingStatus::Reserved,
            customer_name: "Ana".to_string(),
            customer_phone: String::new(),
            customer_email: String::new(),
            origin: BookingOrigin::Public,
            notes: String::new(),
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn round_hours_is_one_decimal_for_display() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let booking = booking_at(date, NaiveTime::from_hms_opt(18, 0, 0).unwrap());

        let now = NaiveDateTime::new(date, NaiveTime::from_hms_opt(15, 30, 0).unwrap());
        assert_eq!(round_hours(hours_until(&booking, now)), 2.5);

        let now = NaiveDateTime::new(date, NaiveTime::from_hms_opt(17, 50, 0).unwrap());
        assert_eq!(round_hours(hours_until(&booking, now)), 0.2);
    }

    #[test]
    fn cancellation_gate_compares_exact_hours() {
        // 117 minutes ahead displays as 2.0 but is still inside a 2 hour window
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let booking = booking_at(date, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        let now = NaiveDateTime::new(date, NaiveTime::from_hms_opt(16, 3, 0).unwrap());

        let hours = hours_until(&booking, now);
        assert!(hours < 2.0);
        assert_eq!(round_hours(hours), 2.0);
    }

    #[test]
    fn hours_until_is_negative_after_start() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let booking = booking_at(date, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        let now = NaiveDateTime::new(date, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert!(hours_until(&booking, now) < 0.0);
    }
}
