//! Time slot configuration service

use crate::{
    error::{AppError, AppResult},
    models::schedule::{TimeSlotConfig, UpdateTimeSlotConfig},
    repository::Repository,
};

pub struct ScheduleService {
    repository: Repository,
}

impl ScheduleService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self) -> AppResult<TimeSlotConfig> {
        self.repository.schedule.get_active().await
    }

    pub async fn update(&self, data: &UpdateTimeSlotConfig) -> AppResult<TimeSlotConfig> {
        let current = self.repository.schedule.get_active().await?;
        data.check(&current).map_err(AppError::Validation)?;
        self.repository.schedule.update(data).await
    }
}
