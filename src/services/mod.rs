//! Business logic layer

pub mod auth;
pub mod bookings;
pub mod courts;
pub mod notifications;
pub mod products;
pub mod public;
pub mod reports;
pub mod schedule;
pub mod slots;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
pub struct Services {
    repository: Repository,
    pub auth: auth::AuthService,
    pub bookings: bookings::BookingsService,
    pub courts: courts::CourtsService,
    pub products: products::ProductsService,
    pub notifications: notifications::NotificationsService,
    pub public: public::PublicService,
    pub reports: reports::ReportsService,
    pub schedule: schedule::ScheduleService,
}

impl Services {
    pub fn new(repository: Repository, config: Arc<AppConfig>) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), config),
            bookings: bookings::BookingsService::new(repository.clone()),
            courts: courts::CourtsService::new(repository.clone()),
            products: products::ProductsService::new(repository.clone()),
            notifications: notifications::NotificationsService::new(repository.clone()),
            public: public::PublicService::new(repository.clone()),
            reports: reports::ReportsService::new(repository.clone()),
            schedule: schedule::ScheduleService::new(repository.clone()),
            repository,
        }
    }

    /// Database pool, for readiness checks
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.repository.pool
    }
}
