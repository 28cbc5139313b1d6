//! Bookings repository: booking lifecycle, closures and cancellation tokens

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingListItem, BookingQuery, CalendarEntry, CreateBooking, UpdateBooking},
        closure::{split_matches, BookingClosure},
        enums::{BookingOrigin, BookingStatus},
        report::{ClosureWithBooking, HistoryQuery, HistoryRow},
        token::{self, CancellationToken},
    },
};

/// Occupied interval on a court for one day, used by slot generation
#[derive(Debug, Clone, FromRow)]
pub struct BusyInterval {
    pub court_id: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Turno no encontrado".to_string()))
    }

    /// List bookings with filters, ordered by date then start time
    pub async fn list(&self, query: &BookingQuery) -> AppResult<Vec<BookingListItem>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.court.is_some() {
            conditions.push(format!("b.court_id = ${}", idx));
            idx += 1;
        }
        if query.date.is_some() {
            conditions.push(format!("b.date = ${}", idx));
            idx += 1;
        }
        if query.status.is_some() {
            conditions.push(format!("b.status = ${}", idx));
            idx += 1;
        }
        if query.search.is_some() {
            conditions.push(format!(
                "(b.customer_name ILIKE ${} OR b.customer_phone ILIKE ${})",
                idx, idx
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT b.id, b.court_id AS court, c.name AS court_name, b.date,
                   b.start_time, b.end_time, b.status, '' AS status_display,
                   b.customer_name, b.customer_phone
            FROM bookings b
            JOIN courts c ON b.court_id = c.id
            {}
            ORDER BY b.date, b.start_time
            "#,
            where_clause
        );

        let mut builder = sqlx::query_as::<_, BookingListItem>(&sql);
        if let Some(court) = query.court {
            builder = builder.bind(court);
        }
        if let Some(date) = query.date {
            builder = builder.bind(date);
        }
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(ref search) = query.search {
            builder = builder.bind(format!("%{}%", search));
        }

        let mut rows = builder.fetch_all(&self.pool).await?;
        for row in &mut rows {
            row.status_display = row.status.label().to_string();
        }
        Ok(rows)
    }

    /// Whether a non-cancelled booking overlaps the given interval on a court.
    /// `exclude` skips one booking, for updates.
    pub async fn has_overlap(
        &self,
        court_id: i32,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        exclude: Option<i32>,
    ) -> AppResult<bool> {
        let overlapping: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE court_id = $1 AND date = $2
                  AND start_time < $4 AND end_time > $3
                  AND status != 'cancelled'
                  AND ($5::int IS NULL OR id != $5)
            )
            "#,
        )
        .bind(court_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(overlapping)
    }

    /// Create a booking; always starts as reserved
    pub async fn create(
        &self,
        data: &CreateBooking,
        customer_email: &str,
        origin: BookingOrigin,
        created_by: Option<i32>,
    ) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (court_id, date, start_time, end_time, status, customer_name,
                 customer_phone, customer_email, origin, notes, created_by)
            VALUES ($1, $2, $3, $4, 'reserved', $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(data.court)
        .bind(data.date)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(&data.customer_name)
        .bind(&data.customer_phone)
        .bind(customer_email)
        .bind(origin)
        .bind(&data.notes)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict(
                "Ya existe un turno en este horario para esta cancha".to_string(),
            ),
            other => AppError::Database(other),
        })?;
        Ok(row)
    }

    /// Partially update a booking
    pub async fn update(&self, id: i32, data: &UpdateBooking) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET court_id = COALESCE($2, court_id),
                date = COALESCE($3, date),
                start_time = COALESCE($4, start_time),
                end_time = COALESCE($5, end_time),
                customer_name = COALESCE($6, customer_name),
                customer_phone = COALESCE($7, customer_phone),
                notes = COALESCE($8, notes),
                status = COALESCE($9, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.court)
        .bind(data.date)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(&data.customer_name)
        .bind(&data.customer_phone)
        .bind(&data.notes)
        .bind(data.status)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound("Turno no encontrado".to_string()))
    }

    /// Set the booking status without further validation
    pub async fn set_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound("Turno no encontrado".to_string()))
    }

    /// Non-cancelled bookings in a date range for the calendar view
    pub async fn calendar(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
        court: Option<i32>,
    ) -> AppResult<Vec<CalendarEntry>> {
        let rows = sqlx::query_as::<_, CalendarEntry>(
            r#"
            SELECT b.id, b.court_id, c.name AS court_name, b.date,
                   b.start_time, b.end_time, b.status, b.customer_name
            FROM bookings b
            JOIN courts c ON b.court_id = c.id
            WHERE b.status != 'cancelled'
              AND b.date >= $1 AND b.date <= $2
              AND ($3::int IS NULL OR b.court_id = $3)
            ORDER BY b.date, b.start_time
            "#,
        )
        .bind(date_from)
        .bind(date_to)
        .bind(court)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// All occupied intervals for one day, one query for every court
    pub async fn busy_intervals(&self, date: NaiveDate) -> AppResult<Vec<BusyInterval>> {
        let rows = sqlx::query_as::<_, BusyInterval>(
            r#"
            SELECT court_id, start_time, end_time
            FROM bookings
            WHERE date = $1 AND status != 'cancelled'
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Reserved bookings from today on, matched by customer name or phone
    pub async fn search_reserved(
        &self,
        name: Option<&str>,
        phone: Option<&str>,
        today: NaiveDate,
    ) -> AppResult<Vec<BookingListItem>> {
        let mut rows = sqlx::query_as::<_, BookingListItem>(
            r#"
            SELECT b.id, b.court_id AS court, c.name AS court_name, b.date,
                   b.start_time, b.end_time, b.status, '' AS status_display,
                   b.customer_name, b.customer_phone
            FROM bookings b
            JOIN courts c ON b.court_id = c.id
            WHERE b.status = 'reserved' AND b.date >= $1
              AND (($2::text IS NOT NULL AND b.customer_name ILIKE $2)
                   OR ($3::text IS NOT NULL AND b.customer_phone = $3))
            ORDER BY b.date, b.start_time
            "#,
        )
        .bind(today)
        .bind(name.map(|n| format!("%{}%", n)))
        .bind(phone)
        .fetch_all(&self.pool)
        .await?;

        for row in &mut rows {
            row.status_display = row.status.label().to_string();
        }
        Ok(rows)
    }

    // ---- Closures ----

    /// Get the closure of a booking, if any
    pub async fn get_closure(&self, booking_id: i32) -> AppResult<Option<BookingClosure>> {
        let row = sqlx::query_as::<_, BookingClosure>(
            "SELECT * FROM booking_closures WHERE booking_id = $1",
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Close a reserved booking: create the settlement record and mark it
    /// completed, in one transaction. The row lock makes a concurrent second
    /// close fail on the already-closed check rather than double-writing.
    pub async fn close(
        &self,
        booking_id: i32,
        booking_amount: Option<Decimal>,
        cash_amount: Decimal,
        transfer_amount: Decimal,
        notes: &str,
        closed_by: Option<i32>,
    ) -> AppResult<BookingClosure> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE id = $1 FOR UPDATE",
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Turno no encontrado".to_string()))?;

        if !booking.can_be_closed() {
            return Err(AppError::BusinessRule(format!(
                "Solo se pueden cerrar turnos reservados. Estado actual: {}",
                booking.status.label()
            )));
        }

        let already_closed: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM booking_closures WHERE booking_id = $1)",
        )
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_closed {
            return Err(AppError::BusinessRule("Este turno ya fue cerrado".to_string()));
        }

        // Default to the court's configured price
        let booking_amount = match booking_amount {
            Some(amount) => amount,
            None => {
                sqlx::query_scalar::<_, Decimal>("SELECT price FROM courts WHERE id = $1")
                    .bind(booking.court_id)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        if !split_matches(booking_amount, cash_amount, transfer_amount) {
            return Err(AppError::BusinessRule(format!(
                "La suma de efectivo (${}) + transferencia (${}) debe ser igual al monto del turno (${})",
                cash_amount, transfer_amount, booking_amount
            )));
        }

        let consumptions_amount: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_price), 0) FROM consumptions WHERE booking_id = $1",
        )
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;

        let closure = sqlx::query_as::<_, BookingClosure>(
            r#"
            INSERT INTO booking_closures
                (booking_id, booking_amount, cash_amount, transfer_amount,
                 consumptions_amount, total_amount, notes, closed_by)
            VALUES ($1, $2, $3, $4, $5, $2 + $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(booking_amount)
        .bind(cash_amount)
        .bind(transfer_amount)
        .bind(consumptions_amount)
        .bind(notes)
        .bind(closed_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE bookings SET status = 'completed', updated_at = NOW() WHERE id = $1")
            .bind(booking_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(closure)
    }

    // ---- Cancellation tokens ----

    /// Create the cancellation token for a public booking
    pub async fn create_token(&self, booking_id: i32) -> AppResult<CancellationToken> {
        let code = token::generate_code();
        let row = sqlx::query_as::<_, CancellationToken>(
            "INSERT INTO cancellation_tokens (booking_id, token) VALUES ($1, $2) RETURNING *",
        )
        .bind(booking_id)
        .bind(&code)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Look a token up by its code
    pub async fn get_token(&self, code: &str) -> AppResult<CancellationToken> {
        sqlx::query_as::<_, CancellationToken>(
            "SELECT * FROM cancellation_tokens WHERE token = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Código de cancelación no válido".to_string()))
    }

    // ---- Reports ----

    /// Closures for bookings played on one date
    pub async fn closures_for_date(&self, date: NaiveDate) -> AppResult<Vec<ClosureWithBooking>> {
        let rows = sqlx::query_as::<_, ClosureWithBooking>(
            r#"
            SELECT b.id AS booking_id, c.name AS court_name, b.start_time, b.end_time,
                   b.customer_name, bc.booking_amount, bc.cash_amount, bc.transfer_amount,
                   bc.consumptions_amount, bc.total_amount, bc.closed_at
            FROM booking_closures bc
            JOIN bookings b ON bc.booking_id = b.id
            JOIN courts c ON b.court_id = c.id
            WHERE b.date = $1
            ORDER BY bc.closed_at
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Booking history with optional filters, newest first
    pub async fn history(&self, query: &HistoryQuery) -> AppResult<Vec<HistoryRow>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.date_from.is_some() {
            conditions.push(format!("b.date >= ${}", idx));
            idx += 1;
        }
        if query.date_to.is_some() {
            conditions.push(format!("b.date <= ${}", idx));
            idx += 1;
        }
        if query.court.is_some() {
            conditions.push(format!("b.court_id = ${}", idx));
            idx += 1;
        }
        if query.status.is_some() {
            conditions.push(format!("b.status = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT b.id, c.name AS court_name, b.date, b.start_time, b.end_time,
                   b.status, b.customer_name, b.customer_phone, b.created_at,
                   bc.booking_amount, bc.cash_amount, bc.transfer_amount,
                   bc.consumptions_amount, bc.total_amount, bc.closed_at
            FROM bookings b
            JOIN courts c ON b.court_id = c.id
            LEFT JOIN booking_closures bc ON bc.booking_id = b.id
            {}
            ORDER BY b.date DESC, b.start_time DESC
            "#,
            where_clause
        );

        let mut builder = sqlx::query_as::<_, HistoryRow>(&sql);
        if let Some(date_from) = query.date_from {
            builder = builder.bind(date_from);
        }
        if let Some(date_to) = query.date_to {
            builder = builder.bind(date_to);
        }
        if let Some(court) = query.court {
            builder = builder.bind(court);
        }
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }
}
