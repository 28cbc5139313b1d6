//! Staff user model and JWT claims

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::UserRole;
use crate::error::AppError;

/// Staff user from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// User info exposed over the API (no credentials)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub role_display: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            role_display: user.role.label().to_string(),
            role: user.role,
        }
    }
}

/// Update own profile request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfile {
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    /// Required when `new_password` is set
    pub current_password: Option<String>,
    #[validate(length(min = 8))]
    pub new_password: Option<String>,
}

/// JWT claims for an authenticated staff user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Writes on courts and products are reserved to administrators
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Se requiere rol de administrador".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims(role: UserRole) -> UserClaims {
        let now = Utc::now().timestamp();
        UserClaims {
            sub: "ana".to_string(),
            user_id: 7,
            role,
            iat: now,
            exp: now + 3600,
        }
    }

    #[test]
    fn token_round_trip() {
        let claims = claims(UserRole::Admin);
        let token = claims.create_token("test-secret").unwrap();
        let parsed = UserClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(parsed.user_id, 7);
        assert_eq!(parsed.role, UserRole::Admin);
    }

    #[test]
    fn token_rejects_wrong_secret() {
        let token = claims(UserRole::Reception).create_token("secret-a").unwrap();
        assert!(UserClaims::from_token(&token, "secret-b").is_err());
    }

    #[test]
    fn reception_cannot_pass_admin_gate() {
        assert!(claims(UserRole::Reception).require_admin().is_err());
        assert!(claims(UserRole::Admin).require_admin().is_ok());
    }
}
