//! Global scheduling configuration and slot types

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Global slot-generation parameters. A single active row exists; it is
/// created with these defaults on first access.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TimeSlotConfig {
    pub id: i32,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub slot_duration_minutes: i32,
    pub min_cancellation_hours: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Update request for the configuration screen (partial)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTimeSlotConfig {
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
    pub slot_duration_minutes: Option<i32>,
    pub min_cancellation_hours: Option<i32>,
}

impl UpdateTimeSlotConfig {
    pub fn check(&self, current: &TimeSlotConfig) -> Result<(), String> {
        let opening = self.opening_time.unwrap_or(current.opening_time);
        let closing = self.closing_time.unwrap_or(current.closing_time);
        if closing <= opening {
            return Err("La hora de cierre debe ser posterior a la de apertura".to_string());
        }
        if self.slot_duration_minutes.unwrap_or(current.slot_duration_minutes) <= 0 {
            return Err("La duración del turno debe ser mayor a 0".to_string());
        }
        if self.min_cancellation_hours.unwrap_or(current.min_cancellation_hours) < 0 {
            return Err("Las horas mínimas de cancelación no pueden ser negativas".to_string());
        }
        Ok(())
    }
}

/// Schedule parameters echoed on public endpoints, times as HH:MM
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleEcho {
    pub opening_time: String,
    pub closing_time: String,
    pub slot_duration_minutes: i32,
}

impl From<&TimeSlotConfig> for ScheduleEcho {
    fn from(config: &TimeSlotConfig) -> Self {
        Self {
            opening_time: config.opening_time.format("%H:%M").to_string(),
            closing_time: config.closing_time.format("%H:%M").to_string(),
            slot_duration_minutes: config.slot_duration_minutes,
        }
    }
}

/// One bookable interval on one court, as shown in the public wizard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvailableSlot {
    pub court_id: i32,
    pub court_name: String,
    /// Court price as a plain decimal string
    pub court_price: String,
    pub start_time: String,
    pub end_time: String,
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn config() -> TimeSlotConfig {
        TimeSlotConfig {
            id: 1,
            opening_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            closing_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            slot_duration_minutes: 90,
            min_cancellation_hours: 2,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn echo_formats_times_without_seconds() {
        let echo = ScheduleEcho::from(&config());
        assert_eq!(echo.opening_time, "08:00");
        assert_eq!(echo.closing_time, "23:00");
    }

    #[test]
    fn update_rejects_inverted_hours() {
        let update = UpdateTimeSlotConfig {
            closing_time: Some(NaiveTime::from_hms_opt(7, 0, 0).unwrap()),
            ..Default::default()
        };
        assert!(update.check(&config()).is_err());
    }

    #[test]
    fn update_rejects_zero_duration() {
        let update = UpdateTimeSlotConfig {
            slot_duration_minutes: Some(0),
            ..Default::default()
        };
        assert!(update.check(&config()).is_err());
    }
}
