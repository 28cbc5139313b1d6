//! Padel Club booking server
//!
//! A Rust REST JSON API for a padel-court booking business: staff-side booking
//! management with split-payment closures, court/product administration,
//! reports and notifications, plus a public self-service booking flow.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
