//! Admin notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::NotificationType;

/// Notification for a staff user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i32,
    pub recipient_id: i32,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub booking_id: Option<i32>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for fanning a notification out to every admin
#[derive(Debug, Clone)]
pub struct NotifyAdmins {
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub booking_id: Option<i32>,
}
