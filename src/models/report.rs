//! Report types: daily cash summary and booking history

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::BookingStatus;

/// A closure joined with its booking, as read for the daily summary
#[derive(Debug, Clone, FromRow)]
pub struct ClosureWithBooking {
    pub booking_id: i32,
    pub court_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub customer_name: String,
    pub booking_amount: Decimal,
    pub cash_amount: Decimal,
    pub transfer_amount: Decimal,
    pub consumptions_amount: Decimal,
    pub total_amount: Decimal,
    pub closed_at: DateTime<Utc>,
}

/// Totals for one payment method in the daily summary
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentMethodTotal {
    pub method: String,
    pub method_display: String,
    #[schema(value_type = String)]
    pub total: Decimal,
    pub count: usize,
}

/// One closed booking in the daily summary detail list
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClosedBookingDetail {
    pub booking_id: i32,
    pub court_name: String,
    /// "HH:MM-HH:MM"
    pub time: String,
    pub customer_name: String,
    #[schema(value_type = String)]
    pub cash_amount: Decimal,
    #[schema(value_type = String)]
    pub transfer_amount: Decimal,
    pub payment_summary: String,
    #[schema(value_type = String)]
    pub booking_amount: Decimal,
    #[schema(value_type = String)]
    pub consumptions_amount: Decimal,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub closed_at: DateTime<Utc>,
}

/// Daily billing summary
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailySummary {
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub total_bookings: usize,
    #[schema(value_type = String)]
    pub total_booking_amount: Decimal,
    #[schema(value_type = String)]
    pub total_consumptions_amount: Decimal,
    pub by_payment_method: Vec<PaymentMethodTotal>,
    pub bookings: Vec<ClosedBookingDetail>,
}

/// History query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct HistoryQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub court: Option<i32>,
    pub status: Option<BookingStatus>,
}

/// Row read for the history report: booking plus optional closure columns
#[derive(Debug, Clone, FromRow)]
pub struct HistoryRow {
    pub id: i32,
    pub court_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: BookingStatus,
    pub customer_name: String,
    pub customer_phone: String,
    pub created_at: DateTime<Utc>,
    pub booking_amount: Option<Decimal>,
    pub cash_amount: Option<Decimal>,
    pub transfer_amount: Option<Decimal>,
    pub consumptions_amount: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Closure section of a history entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryClosure {
    #[schema(value_type = String)]
    pub cash_amount: Decimal,
    #[schema(value_type = String)]
    pub transfer_amount: Decimal,
    pub payment_summary: String,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    #[schema(value_type = String)]
    pub booking_amount: Decimal,
    #[schema(value_type = String)]
    pub consumptions_amount: Decimal,
    pub closed_at: DateTime<Utc>,
}

/// One booking in the history report
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryItem {
    pub id: i32,
    pub court_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: BookingStatus,
    pub status_display: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub created_at: DateTime<Utc>,
    pub closure: Option<HistoryClosure>,
}
