//! Authentication service: login, profile, password hashing

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    models::user::{UpdateProfile, User, UserClaims, UserInfo},
    repository::Repository,
};

pub struct AuthService {
    repository: Repository,
    config: Arc<AppConfig>,
}

impl AuthService {
    pub fn new(repository: Repository, config: Arc<AppConfig>) -> Self {
        Self { repository, config }
    }

    /// Verify credentials and issue a JWT. The same message is returned for
    /// an unknown username and a wrong password.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(String, UserInfo)> {
        let invalid =
            || AppError::Authentication("Usuario o contraseña incorrectos".to_string());

        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password)? {
            return Err(invalid());
        }

        let token = self.issue_token(&user)?;
        Ok((token, UserInfo::from(user)))
    }

    pub async fn get_user(&self, user_id: i32) -> AppResult<UserInfo> {
        let user = self.repository.users.get_by_id(user_id).await?;
        Ok(UserInfo::from(user))
    }

    /// Update the caller's own profile. Changing the password requires the
    /// current one.
    pub async fn update_profile(
        &self,
        user_id: i32,
        profile: &UpdateProfile,
    ) -> AppResult<UserInfo> {
        let user = self.repository.users.get_by_id(user_id).await?;

        let password = match &profile.new_password {
            Some(new_password) => {
                let current = profile.current_password.as_deref().ok_or_else(|| {
                    AppError::Validation(
                        "Se requiere la contraseña actual para cambiarla".to_string(),
                    )
                })?;
                if !verify_password(current, &user.password)? {
                    return Err(AppError::Authentication(
                        "La contraseña actual es incorrecta".to_string(),
                    ));
                }
                Some(hash_password(new_password)?)
            }
            None => None,
        };

        let updated = self
            .repository
            .users
            .update_profile(user_id, profile, password)
            .await?;
        Ok(UserInfo::from(updated))
    }

    fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.config.auth.jwt_expiration_hours as i64);

        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            role: user.role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        claims
            .create_token(&self.config.auth.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("secreto123").unwrap();
        assert!(verify_password("secreto123", &hash).unwrap());
        assert!(!verify_password("otro", &hash).unwrap());
    }
}
