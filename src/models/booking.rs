//! Booking model and related types

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::closure::BookingClosure;
use super::court::CourtShort;
use super::enums::{BookingOrigin, BookingStatus};

/// Booking model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i32,
    pub court_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: BookingStatus,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub origin: BookingOrigin,
    pub notes: String,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Only open bookings can be cancelled
    pub fn can_be_cancelled(&self) -> bool {
        matches!(self.status, BookingStatus::Available | BookingStatus::Reserved)
    }

    /// Only reserved bookings can be closed
    pub fn can_be_closed(&self) -> bool {
        self.status == BookingStatus::Reserved
    }
}

/// Booking with full details for the admin panel
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingDetails {
    pub id: i32,
    pub court: i32,
    pub court_info: CourtShort,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: BookingStatus,
    pub status_display: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub origin: BookingOrigin,
    pub notes: String,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub duration_minutes: i64,
    pub can_be_cancelled: bool,
    pub can_be_closed: bool,
    pub closure: Option<BookingClosure>,
}

impl BookingDetails {
    pub fn new(booking: Booking, court: CourtShort, closure: Option<BookingClosure>) -> Self {
        Self {
            id: booking.id,
            court: booking.court_id,
            court_info: court,
            date: booking.date,
            start_time: booking.start_time,
            end_time: booking.end_time,
            status_display: booking.status.label().to_string(),
            status: booking.status,
            customer_name: booking.customer_name,
            customer_phone: booking.customer_phone,
            origin: booking.origin,
            notes: booking.notes,
            created_by: booking.created_by,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
            duration_minutes: (booking.end_time - booking.start_time).num_minutes(),
            can_be_cancelled: matches!(
                booking.status,
                BookingStatus::Available | BookingStatus::Reserved
            ),
            can_be_closed: booking.status == BookingStatus::Reserved,
            closure,
        }
    }
}

/// Compact booking for listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookingListItem {
    pub id: i32,
    pub court: i32,
    pub court_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: BookingStatus,
    pub status_display: String,
    pub customer_name: String,
    pub customer_phone: String,
}

/// Compact booking for the calendar view
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CalendarEntry {
    pub id: i32,
    pub court_id: i32,
    pub court_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: BookingStatus,
    pub customer_name: String,
}

/// Create booking request (admin panel)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub court: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub notes: String,
}

/// Update booking request (partial)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBooking {
    pub court: Option<i32>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[validate(length(max = 200))]
    pub customer_name: Option<String>,
    #[validate(length(max = 50))]
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    pub status: Option<BookingStatus>,
}

impl UpdateBooking {
    /// Whether any scheduling field changes, requiring a fresh overlap check
    pub fn touches_schedule(&self) -> bool {
        self.court.is_some()
            || self.date.is_some()
            || self.start_time.is_some()
            || self.end_time.is_some()
    }
}

/// Booking list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookingQuery {
    pub court: Option<i32>,
    pub date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
    /// Substring match on customer name or phone
    pub search: Option<String>,
}

/// Calendar query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CalendarQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub court: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: 1,
            court_id: 1,
            date: NaiveDate::from_ymd_opt(2026, 8, 26).unwrap(),
            start_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            status,
            customer_name: "Juan Pérez".to_string(),
            customer_phone: "1155550000".to_string(),
            customer_email: String::new(),
            origin: BookingOrigin::Admin,
            notes: String::new(),
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn duration_is_in_minutes() {
        assert_eq!(booking(BookingStatus::Reserved).duration_minutes(), 90);
    }

    #[test]
    fn lifecycle_gates() {
        assert!(booking(BookingStatus::Available).can_be_cancelled());
        assert!(booking(BookingStatus::Reserved).can_be_cancelled());
        assert!(!booking(BookingStatus::Completed).can_be_cancelled());
        assert!(!booking(BookingStatus::Cancelled).can_be_cancelled());

        assert!(booking(BookingStatus::Reserved).can_be_closed());
        assert!(!booking(BookingStatus::Available).can_be_closed());
    }
}
