//! Product and consumption models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::ProductCategory;

/// Product model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category: ProductCategory,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub is_active: bool,
    /// None means stock is not tracked for this product
    pub stock: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product as listed, with its category label
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub category_display: String,
}

impl From<Product> for ProductDetails {
    fn from(product: Product) -> Self {
        let category_display = product.category.label().to_string();
        Self {
            product,
            category_display,
        }
    }
}

/// Create/replace product request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub category: ProductCategory,
    #[schema(value_type = String)]
    pub price: Decimal,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub stock: Option<i32>,
}

fn default_true() -> bool {
    true
}

impl CreateProduct {
    /// Domain checks that validator's derive cannot express for Decimal
    pub fn check(&self) -> Result<(), String> {
        if self.price <= Decimal::ZERO {
            return Err("El precio debe ser mayor a 0".to_string());
        }
        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err("El stock no puede ser negativo".to_string());
            }
        }
        Ok(())
    }
}

/// Product list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ProductQuery {
    pub category: Option<ProductCategory>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
    /// Include inactive products (the list shows active only by default)
    #[serde(default)]
    pub show_all: bool,
}

/// Consumption line item attached to a booking
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Consumption {
    pub id: i32,
    #[serde(rename = "booking")]
    pub booking_id: i32,
    #[serde(rename = "product")]
    pub product_id: i32,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Consumption with the product summary the closure modal renders
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ConsumptionDetails {
    pub id: i32,
    #[serde(rename = "booking")]
    pub booking_id: i32,
    #[serde(rename = "product")]
    pub product_id: i32,
    pub product_name: String,
    pub product_category: ProductCategory,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Create consumption request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateConsumption {
    pub booking: i32,
    pub product: i32,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    /// Defaults to the product's current price when omitted
    #[schema(value_type = Option<String>)]
    pub unit_price: Option<Decimal>,
}

fn default_quantity() -> i32 {
    1
}

/// Consumption list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ConsumptionQuery {
    pub booking: Option<i32>,
    pub product: Option<i32>,
}
