//! Courts service

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::court::{Court, CourtQuery, CreateCourt, UpdateCourt},
    repository::Repository,
};

pub struct CourtsService {
    repository: Repository,
}

impl CourtsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &CourtQuery) -> AppResult<Vec<Court>> {
        self.repository.courts.list(query).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Court> {
        self.repository.courts.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateCourt) -> AppResult<Court> {
        data.validate()?;
        check_price(data.price)?;
        self.repository.courts.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateCourt) -> AppResult<Court> {
        data.validate()?;
        check_price(data.price)?;
        self.repository.courts.update(id, data).await
    }

    pub async fn toggle_active(&self, id: i32) -> AppResult<Court> {
        self.repository.courts.toggle_active(id).await
    }

    pub async fn update_price(&self, id: i32, price: Decimal) -> AppResult<Court> {
        check_price(price)?;
        self.repository.courts.update_price(id, price).await
    }
}

fn check_price(price: Decimal) -> AppResult<()> {
    if price <= Decimal::ZERO {
        return Err(AppError::Validation(
            "El precio debe ser mayor a 0".to_string(),
        ));
    }
    Ok(())
}
