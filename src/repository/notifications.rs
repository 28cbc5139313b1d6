//! Notifications repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::notification::{Notification, NotifyAdmins},
};

#[derive(Clone)]
pub struct NotificationsRepository {
    pool: Pool<Postgres>,
}

impl NotificationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// 50 most recent notifications for a recipient
    pub async fn list_for_recipient(&self, recipient_id: i32) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            LIMIT 50
            "#,
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn unread_count(&self, recipient_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Mark one notification read. Scoped to the recipient so a user cannot
    /// touch someone else's notifications.
    pub async fn mark_read(&self, id: i32, recipient_id: i32) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications SET is_read = TRUE
            WHERE id = $1 AND recipient_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Notificación no encontrada".to_string()))
    }

    /// Mark all of a recipient's notifications read, returning how many changed
    pub async fn mark_all_read(&self, recipient_id: i32) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Fan one notification out to every active admin
    pub async fn notify_admins(&self, admin_ids: &[i32], payload: &NotifyAdmins) -> AppResult<()> {
        if admin_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            r#"
            INSERT INTO notifications (recipient_id, title, message, notification_type, booking_id)
            SELECT recipient, $2, $3, $4, $5
            FROM UNNEST($1::int[]) AS recipient
            "#,
        )
        .bind(admin_ids)
        .bind(&payload.title)
        .bind(&payload.message)
        .bind(payload.notification_type)
        .bind(payload.booking_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
