//! Booking closure (financial settlement) model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Settlement record created when a reserved booking is closed.
/// Immutable once written, except for `consumptions_amount`/`total_amount`
/// which are resynchronized when consumptions change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingClosure {
    pub id: i32,
    #[serde(rename = "booking")]
    pub booking_id: i32,
    #[schema(value_type = String)]
    pub booking_amount: Decimal,
    #[schema(value_type = String)]
    pub cash_amount: Decimal,
    #[schema(value_type = String)]
    pub transfer_amount: Decimal,
    #[schema(value_type = String)]
    pub consumptions_amount: Decimal,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub notes: String,
    pub closed_by: Option<i32>,
    pub closed_at: DateTime<Utc>,
}

impl BookingClosure {
    /// Human-readable summary of the payment methods used
    pub fn payment_summary(&self) -> String {
        let mut parts = Vec::new();
        if self.cash_amount > Decimal::ZERO {
            parts.push(format!("Efectivo: {}", format_currency(Some(self.cash_amount))));
        }
        if self.transfer_amount > Decimal::ZERO {
            parts.push(format!(
                "Transferencia: {}",
                format_currency(Some(self.transfer_amount))
            ));
        }
        if parts.is_empty() {
            "Sin pago".to_string()
        } else {
            parts.join(" / ")
        }
    }
}

/// Closure as returned by the API, with the derived payment summary
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClosureDetails {
    #[serde(flatten)]
    pub closure: BookingClosure,
    pub payment_summary: String,
}

impl From<BookingClosure> for ClosureDetails {
    fn from(closure: BookingClosure) -> Self {
        let payment_summary = closure.payment_summary();
        Self {
            closure,
            payment_summary,
        }
    }
}

/// Close booking request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CloseBooking {
    /// Defaults to the court's configured price when omitted
    #[schema(value_type = Option<String>)]
    pub booking_amount: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub cash_amount: Decimal,
    #[serde(default)]
    #[schema(value_type = String)]
    pub transfer_amount: Decimal,
    #[serde(default)]
    pub notes: String,
}

/// Whether a payment split settles the booking amount exactly.
/// Cash plus transfer must equal the booking amount for a closure to be
/// accepted; the admin form mirrors this check live before submitting.
pub fn split_matches(booking_amount: Decimal, cash: Decimal, transfer: Decimal) -> bool {
    cash + transfer == booking_amount
}

/// ARS amount with two decimals; missing values render as zero.
pub fn format_currency(amount: Option<Decimal>) -> String {
    let value = amount.unwrap_or(Decimal::ZERO);
    format!("${:.2}", value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn closure(cash: i64, transfer: i64) -> BookingClosure {
        BookingClosure {
            id: 1,
            booking_id: 10,
            booking_amount: Decimal::new(cash + transfer, 0),
            cash_amount: Decimal::new(cash, 0),
            transfer_amount: Decimal::new(transfer, 0),
            consumptions_amount: Decimal::ZERO,
            total_amount: Decimal::new(cash + transfer, 0),
            notes: String::new(),
            closed_by: None,
            closed_at: Utc::now(),
        }
    }

    #[test]
    fn split_must_settle_exactly() {
        let amount = Decimal::new(5000, 0);
        assert!(split_matches(amount, Decimal::new(3000, 0), Decimal::new(2000, 0)));
        assert!(!split_matches(amount, Decimal::new(3000, 0), Decimal::new(1500, 0)));
        assert!(split_matches(amount, amount, Decimal::ZERO));
        assert!(!split_matches(amount, Decimal::ZERO, Decimal::ZERO));
        assert!(split_matches(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO));
    }

    #[test]
    fn format_currency_zero_and_none() {
        assert_eq!(format_currency(Some(Decimal::ZERO)), "$0.00");
        assert_eq!(format_currency(None), "$0.00");
    }

    #[test]
    fn format_currency_two_decimals() {
        assert_eq!(format_currency(Some(Decimal::new(500050, 2))), "$5000.50");
        assert_eq!(format_currency(Some(Decimal::new(3000, 0))), "$3000.00");
    }

    #[test]
    fn payment_summary_lists_nonzero_methods() {
        assert_eq!(
            closure(3000, 2000).payment_summary(),
            "Efectivo: $3000.00 / Transferencia: $2000.00"
        );
        assert_eq!(closure(5000, 0).payment_summary(), "Efectivo: $5000.00");
        assert_eq!(closure(0, 0).payment_summary(), "Sin pago");
    }
}
