//! Shared domain enums

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

use crate::error::AppError;

macro_rules! text_enum {
    ($name:ident { $($variant:ident => $slug:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $slug),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($slug => Ok($name::$variant),)+
                    other => Err(AppError::Validation(format!(
                        "Valor inválido para {}: {}", stringify!($name), other
                    ))),
                }
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: String = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: AppError| e.to_string().into())
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Booking lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Available,
    Reserved,
    Cancelled,
    Completed,
}

text_enum!(BookingStatus {
    Available => "available",
    Reserved => "reserved",
    Cancelled => "cancelled",
    Completed => "completed",
});

impl BookingStatus {
    /// User-facing label, as rendered by the admin panel
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Available => "Libre",
            BookingStatus::Reserved => "Reservado",
            BookingStatus::Cancelled => "Cancelado",
            BookingStatus::Completed => "Jugado",
        }
    }
}

// ---------------------------------------------------------------------------
// BookingOrigin
// ---------------------------------------------------------------------------

/// Where a booking was created from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingOrigin {
    Admin,
    Public,
}

text_enum!(BookingOrigin {
    Admin => "admin",
    Public => "public",
});

// ---------------------------------------------------------------------------
// CourtType
// ---------------------------------------------------------------------------

/// Court construction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourtType {
    Indoor,
    Outdoor,
    Glass,
}

text_enum!(CourtType {
    Indoor => "indoor",
    Outdoor => "outdoor",
    Glass => "glass",
});

impl CourtType {
    pub fn label(&self) -> &'static str {
        match self {
            CourtType::Indoor => "Interior",
            CourtType::Outdoor => "Exterior",
            CourtType::Glass => "Cristal",
        }
    }
}

// ---------------------------------------------------------------------------
// ProductCategory
// ---------------------------------------------------------------------------

/// Product category for the bar / pro-shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Beverage,
    Snack,
    Equipment,
    Other,
}

text_enum!(ProductCategory {
    Beverage => "beverage",
    Snack => "snack",
    Equipment => "equipment",
    Other => "other",
});

impl ProductCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::Beverage => "Bebida",
            ProductCategory::Snack => "Snack",
            ProductCategory::Equipment => "Equipamiento",
            ProductCategory::Other => "Otro",
        }
    }
}

// ---------------------------------------------------------------------------
// NotificationType
// ---------------------------------------------------------------------------

/// Admin notification type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    BookingCreated,
    BookingCancelled,
}

text_enum!(NotificationType {
    BookingCreated => "booking_created",
    BookingCancelled => "booking_cancelled",
});

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Reception,
}

text_enum!(UserRole {
    Admin => "admin",
    Reception => "reception",
});

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Administrador",
            UserRole::Reception => "Recepción",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_status_round_trip() {
        for status in [
            BookingStatus::Available,
            BookingStatus::Reserved,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            let parsed: BookingStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn invalid_slug_is_rejected() {
        assert!("pending".parse::<BookingStatus>().is_err());
        assert!("vip".parse::<CourtType>().is_err());
    }

    #[test]
    fn status_labels() {
        assert_eq!(BookingStatus::Reserved.label(), "Reservado");
        assert_eq!(BookingStatus::Completed.label(), "Jugado");
    }
}
