//! Notifications service

use crate::{
    error::AppResult,
    models::notification::Notification,
    repository::Repository,
};

pub struct NotificationsService {
    repository: Repository,
}

impl NotificationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, user_id: i32) -> AppResult<Vec<Notification>> {
        self.repository.notifications.list_for_recipient(user_id).await
    }

    pub async fn unread_count(&self, user_id: i32) -> AppResult<i64> {
        self.repository.notifications.unread_count(user_id).await
    }

    pub async fn mark_read(&self, id: i32, user_id: i32) -> AppResult<Notification> {
        self.repository.notifications.mark_read(id, user_id).await
    }

    pub async fn mark_all_read(&self, user_id: i32) -> AppResult<u64> {
        self.repository.notifications.mark_all_read(user_id).await
    }
}
