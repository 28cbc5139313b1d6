//! Courts repository for database operations

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::court::{Court, CourtQuery, CreateCourt, UpdateCourt},
};

#[derive(Clone)]
pub struct CourtsRepository {
    pool: Pool<Postgres>,
}

impl CourtsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get court by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Court> {
        sqlx::query_as::<_, Court>("SELECT * FROM courts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Cancha no encontrada".to_string()))
    }

    /// List courts with optional filters, ordered by name
    pub async fn list(&self, query: &CourtQuery) -> AppResult<Vec<Court>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.is_active.is_some() {
            conditions.push(format!("is_active = ${}", idx));
            idx += 1;
        }
        if query.court_type.is_some() {
            conditions.push(format!("court_type = ${}", idx));
            idx += 1;
        }
        if query.search.is_some() {
            conditions.push(format!("name ILIKE ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("SELECT * FROM courts {} ORDER BY name", where_clause);

        let mut builder = sqlx::query_as::<_, Court>(&sql);
        if let Some(active) = query.is_active {
            builder = builder.bind(active);
        }
        if let Some(court_type) = query.court_type {
            builder = builder.bind(court_type);
        }
        if let Some(ref search) = query.search {
            builder = builder.bind(format!("%{}%", search));
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Active courts ordered by name, for the public flow
    pub async fn list_active(&self) -> AppResult<Vec<Court>> {
        let rows = sqlx::query_as::<_, Court>(
            "SELECT * FROM courts WHERE is_active = TRUE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a court; names are unique
    pub async fn create(&self, data: &CreateCourt) -> AppResult<Court> {
        let row = sqlx::query_as::<_, Court>(
            r#"
            INSERT INTO courts (name, court_type, price, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.court_type)
        .bind(data.price)
        .bind(data.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("Ya existe una cancha con ese nombre".to_string())
            }
            other => AppError::Database(other),
        })?;
        Ok(row)
    }

    /// Replace a court's fields
    pub async fn update(&self, id: i32, data: &UpdateCourt) -> AppResult<Court> {
        let row = sqlx::query_as::<_, Court>(
            r#"
            UPDATE courts
            SET name = $2, court_type = $3, price = $4, is_active = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.court_type)
        .bind(data.price)
        .bind(data.is_active)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound("Cancha no encontrada".to_string()))
    }

    /// Flip the active flag
    pub async fn toggle_active(&self, id: i32) -> AppResult<Court> {
        let row = sqlx::query_as::<_, Court>(
            "UPDATE courts SET is_active = NOT is_active, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound("Cancha no encontrada".to_string()))
    }

    /// Update only the price (configuration screen)
    pub async fn update_price(&self, id: i32, price: Decimal) -> AppResult<Court> {
        let row = sqlx::query_as::<_, Court>(
            "UPDATE courts SET price = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(price)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound("Cancha no encontrada".to_string()))
    }
}
