//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{UpdateProfile, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
    }

    /// Get active user by username, for login
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = $1 AND is_active = TRUE",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// IDs of all active admin users, for notification fan-out
    pub async fn admin_ids(&self) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar(
            "SELECT id FROM users WHERE role = 'admin' AND is_active = TRUE",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    /// Update a user's own profile fields; password comes pre-hashed
    pub async fn update_profile(
        &self,
        user_id: i32,
        profile: &UpdateProfile,
        password: Option<String>,
    ) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                password = COALESCE($6, password)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
    }
}
