//! Time slot configuration repository

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::schedule::{TimeSlotConfig, UpdateTimeSlotConfig},
};

#[derive(Clone)]
pub struct ScheduleRepository {
    pool: Pool<Postgres>,
}

impl ScheduleRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// The single active configuration row, created with defaults on first
    /// access (08:00 to 23:00, 90 minute slots, 2 hour cancellation window).
    pub async fn get_active(&self) -> AppResult<TimeSlotConfig> {
        if let Some(config) = sqlx::query_as::<_, TimeSlotConfig>(
            "SELECT * FROM slot_configurations WHERE is_active = TRUE ORDER BY id LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?
        {
            return Ok(config);
        }

        let config = sqlx::query_as::<_, TimeSlotConfig>(
            r#"
            INSERT INTO slot_configurations
                (opening_time, closing_time, slot_duration_minutes, min_cancellation_hours)
            VALUES ('08:00', '23:00', 90, 2)
            RETURNING *
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(config)
    }

    /// Partial update of the active configuration
    pub async fn update(&self, data: &UpdateTimeSlotConfig) -> AppResult<TimeSlotConfig> {
        let current = self.get_active().await?;

        let config = sqlx::query_as::<_, TimeSlotConfig>(
            r#"
            UPDATE slot_configurations
            SET opening_time = $2, closing_time = $3, slot_duration_minutes = $4,
                min_cancellation_hours = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(data.opening_time.unwrap_or(current.opening_time))
        .bind(data.closing_time.unwrap_or(current.closing_time))
        .bind(data.slot_duration_minutes.unwrap_or(current.slot_duration_minutes))
        .bind(
            data.min_cancellation_hours
                .unwrap_or(current.min_cancellation_hours),
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(config)
    }
}
