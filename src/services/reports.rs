//! Reports service: daily cash summary and booking history

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    error::AppResult,
    models::{
        closure::format_currency,
        report::{
            ClosedBookingDetail, ClosureWithBooking, DailySummary, HistoryClosure, HistoryItem,
            HistoryQuery, HistoryRow, PaymentMethodTotal,
        },
    },
    repository::Repository,
};

pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Billing summary for one day; today when no date is given
    pub async fn daily_summary(&self, date: Option<NaiveDate>) -> AppResult<DailySummary> {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        let closures = self.repository.bookings.closures_for_date(date).await?;
        Ok(summarize(date, closures))
    }

    /// Booking history with optional filters
    pub async fn history(&self, query: &HistoryQuery) -> AppResult<Vec<HistoryItem>> {
        let rows = self.repository.bookings.history(query).await?;
        Ok(rows.into_iter().map(history_item).collect())
    }
}

fn payment_summary(cash: Decimal, transfer: Decimal) -> String {
    let mut parts = Vec::new();
    if cash > Decimal::ZERO {
        parts.push(format!("Efectivo: {}", format_currency(Some(cash))));
    }
    if transfer > Decimal::ZERO {
        parts.push(format!("Transferencia: {}", format_currency(Some(transfer))));
    }
    if parts.is_empty() {
        "Sin pago".to_string()
    } else {
        parts.join(" / ")
    }
}

fn summarize(date: NaiveDate, closures: Vec<ClosureWithBooking>) -> DailySummary {
    let mut total_amount = Decimal::ZERO;
    let mut total_booking_amount = Decimal::ZERO;
    let mut total_consumptions_amount = Decimal::ZERO;
    let mut cash_total = Decimal::ZERO;
    let mut cash_count = 0;
    let mut transfer_total = Decimal::ZERO;
    let mut transfer_count = 0;

    let bookings: Vec<ClosedBookingDetail> = closures
        .into_iter()
        .map(|row| {
            total_amount += row.total_amount;
            total_booking_amount += row.booking_amount;
            total_consumptions_amount += row.consumptions_amount;
            if row.cash_amount > Decimal::ZERO {
                cash_total += row.cash_amount;
                cash_count += 1;
            }
            if row.transfer_amount > Decimal::ZERO {
                transfer_total += row.transfer_amount;
                transfer_count += 1;
            }

            ClosedBookingDetail {
                booking_id: row.booking_id,
                court_name: row.court_name,
                time: format!(
                    "{}-{}",
                    row.start_time.format("%H:%M"),
                    row.end_time.format("%H:%M")
                ),
                customer_name: row.customer_name,
                payment_summary: payment_summary(row.cash_amount, row.transfer_amount),
                cash_amount: row.cash_amount,
                transfer_amount: row.transfer_amount,
                booking_amount: row.booking_amount,
                consumptions_amount: row.consumptions_amount,
                total_amount: row.total_amount,
                closed_at: row.closed_at,
            }
        })
        .collect();

    let mut by_payment_method = Vec::new();
    if cash_total > Decimal::ZERO {
        by_payment_method.push(PaymentMethodTotal {
            method: "cash".to_string(),
            method_display: "Efectivo".to_string(),
            total: cash_total,
            count: cash_count,
        });
    }
    if transfer_total > Decimal::ZERO {
        by_payment_method.push(PaymentMethodTotal {
            method: "transfer".to_string(),
            method_display: "Transferencia".to_string(),
            total: transfer_total,
            count: transfer_count,
        });
    }

    DailySummary {
        date,
        total_amount,
        total_bookings: bookings.len(),
        total_booking_amount,
        total_consumptions_amount,
        by_payment_method,
        bookings,
    }
}

fn history_item(row: HistoryRow) -> HistoryItem {
    let closure = row.closed_at.map(|closed_at| {
        let cash = row.cash_amount.unwrap_or(Decimal::ZERO);
        let transfer = row.transfer_amount.unwrap_or(Decimal::ZERO);
        HistoryClosure {
            payment_summary: payment_summary(cash, transfer),
            cash_amount: cash,
            transfer_amount: transfer,
            total_amount: row.total_amount.unwrap_or(Decimal::ZERO),
            booking_amount: row.booking_amount.unwrap_or(Decimal::ZERO),
            consumptions_amount: row.consumptions_amount.unwrap_or(Decimal::ZERO),
            closed_at,
        }
    });

    HistoryItem {
        id: row.id,
        court_name: row.court_name,
        date: row.date,
        start_time: row.start_time,
        end_time: row.end_time,
        status_display: row.status.label().to_string(),
        status: row.status,
        customer_name: row.customer_name,
        customer_phone: row.customer_phone,
        created_at: row.created_at,
        closure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn closure(cash: i64, transfer: i64, consumptions: i64) -> ClosureWithBooking {
        ClosureWithBooking {
            booking_id: 1,
            court_name: "Cancha 1".to_string(),
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            customer_name: "Ana".to_string(),
            booking_amount: Decimal::new(cash + transfer, 0),
            cash_amount: Decimal::new(cash, 0),
            transfer_amount: Decimal::new(transfer, 0),
            consumptions_amount: Decimal::new(consumptions, 0),
            total_amount: Decimal::new(cash + transfer + consumptions, 0),
            closed_at: Utc::now(),
        }
    }

    #[test]
    fn summary_totals_add_up() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let summary = summarize(date, vec![closure(3000, 2000, 1500), closure(4000, 0, 0)]);

        assert_eq!(summary.total_bookings, 2);
        assert_eq!(summary.total_booking_amount, Decimal::new(9000, 0));
        assert_eq!(summary.total_consumptions_amount, Decimal::new(1500, 0));
        assert_eq!(summary.total_amount, Decimal::new(10500, 0));
    }

    #[test]
    fn payment_methods_only_list_used_ones() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let summary = summarize(date, vec![closure(3000, 0, 0), closure(4000, 0, 0)]);

        assert_eq!(summary.by_payment_method.len(), 1);
        let cash = &summary.by_payment_method[0];
        assert_eq!(cash.method, "cash");
        assert_eq!(cash.method_display, "Efectivo");
        assert_eq!(cash.total, Decimal::new(7000, 0));
        assert_eq!(cash.count, 2);
    }

    #[test]
    fn detail_time_is_a_range() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let summary = summarize(date, vec![closure(5000, 0, 0)]);
        assert_eq!(summary.bookings[0].time, "18:00-19:30");
    }

    #[test]
    fn empty_day_has_zero_totals() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let summary = summarize(date, vec![]);
        assert_eq!(summary.total_amount, Decimal::ZERO);
        assert!(summary.by_payment_method.is_empty());
        assert!(summary.bookings.is_empty());
    }
}
