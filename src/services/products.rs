//! Products and consumptions service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::BookingStatus,
        product::{
            Consumption, ConsumptionDetails, ConsumptionQuery, CreateConsumption, CreateProduct,
            ProductDetails, ProductQuery,
        },
    },
    repository::Repository,
};

pub struct ProductsService {
    repository: Repository,
}

impl ProductsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &ProductQuery) -> AppResult<Vec<ProductDetails>> {
        let products = self.repository.products.list(query).await?;
        Ok(products.into_iter().map(ProductDetails::from).collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<ProductDetails> {
        let product = self.repository.products.get_by_id(id).await?;
        Ok(ProductDetails::from(product))
    }

    pub async fn create(&self, data: &CreateProduct) -> AppResult<ProductDetails> {
        data.validate()?;
        data.check().map_err(AppError::Validation)?;
        let product = self.repository.products.create(data).await?;
        Ok(ProductDetails::from(product))
    }

    pub async fn update(&self, id: i32, data: &CreateProduct) -> AppResult<ProductDetails> {
        data.validate()?;
        data.check().map_err(AppError::Validation)?;
        let product = self.repository.products.update(id, data).await?;
        Ok(ProductDetails::from(product))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.products.delete(id).await
    }

    // ---- Consumptions ----

    pub async fn list_consumptions(
        &self,
        query: &ConsumptionQuery,
    ) -> AppResult<Vec<ConsumptionDetails>> {
        self.repository.products.list_consumptions(query).await
    }

    /// Register a consumption on a booking. The unit price defaults to the
    /// product's current price.
    pub async fn create_consumption(&self, data: &CreateConsumption) -> AppResult<Consumption> {
        if data.quantity <= 0 {
            return Err(AppError::Validation(
                "La cantidad debe ser mayor a 0".to_string(),
            ));
        }

        let booking = self.repository.bookings.get_by_id(data.booking).await?;
        if !matches!(
            booking.status,
            BookingStatus::Reserved | BookingStatus::Completed
        ) {
            return Err(AppError::BusinessRule(
                "Solo se pueden agregar consumos a turnos reservados o completados".to_string(),
            ));
        }

        let product = self.repository.products.get_by_id(data.product).await?;
        let unit_price = data.unit_price.unwrap_or(product.price);

        self.repository
            .products
            .create_consumption(data.booking, data.product, data.quantity, unit_price)
            .await
    }

    pub async fn delete_consumption(&self, id: i32) -> AppResult<()> {
        self.repository.products.delete_consumption(id).await
    }
}
