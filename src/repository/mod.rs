//! Repository layer for database operations

pub mod bookings;
pub mod courts;
pub mod notifications;
pub mod products;
pub mod schedule;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub bookings: bookings::BookingsRepository,
    pub courts: courts::CourtsRepository,
    pub products: products::ProductsRepository,
    pub notifications: notifications::NotificationsRepository,
    pub schedule: schedule::ScheduleRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            bookings: bookings::BookingsRepository::new(pool.clone()),
            courts: courts::CourtsRepository::new(pool.clone()),
            products: products::ProductsRepository::new(pool.clone()),
            notifications: notifications::NotificationsRepository::new(pool.clone()),
            schedule: schedule::ScheduleRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}
