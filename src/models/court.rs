//! Court model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::CourtType;

/// Court model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Court {
    pub id: i32,
    pub name: String,
    pub court_type: CourtType,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact court representation for listings and public endpoints
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourtShort {
    pub id: i32,
    pub name: String,
    pub court_type: CourtType,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub is_active: bool,
}

/// Create court request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourt {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub court_type: CourtType,
    #[schema(value_type = String)]
    pub price: Decimal,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Update court request (full replace, PUT semantics)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourt {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub court_type: CourtType,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub is_active: bool,
}

/// Court list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CourtQuery {
    pub is_active: Option<bool>,
    pub court_type: Option<CourtType>,
    /// Substring match on the court name
    pub search: Option<String>,
}

/// Price update request for the configuration screen
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCourtPrice {
    #[schema(value_type = String)]
    pub price: Decimal,
}
