//! Products and consumptions repository

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::product::{
        Consumption, ConsumptionDetails, ConsumptionQuery, CreateProduct, Product, ProductQuery,
    },
};

#[derive(Clone)]
pub struct ProductsRepository {
    pool: Pool<Postgres>,
}

impl ProductsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get product by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Product> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Producto no encontrado".to_string()))
    }

    /// List products ordered by category then name
    pub async fn list(&self, query: &ProductQuery) -> AppResult<Vec<Product>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        // The list shows active products unless explicitly asked otherwise
        if !query.show_all && query.is_active.is_none() {
            conditions.push("is_active = TRUE".to_string());
        }
        if query.is_active.is_some() {
            conditions.push(format!("is_active = ${}", idx));
            idx += 1;
        }
        if query.category.is_some() {
            conditions.push(format!("category = ${}", idx));
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

        let sql = format!(
            "SELECT * FROM products {} ORDER BY category, name",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, Product>(&sql);
        if let Some(active) = query.is_active {
            builder = builder.bind(active);
        }
        if let Some(category) = query.category {
            builder = builder.bind(category);
        }
        if let Some(ref search) = query.search {
            builder = builder.bind(format!("%{}%", search));
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Create a product
    pub async fn create(&self, data: &CreateProduct) -> AppResult<Product> {
        let row = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, category, price, is_active, stock)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.category)
        .bind(data.price)
        .bind(data.is_active)
        .bind(data.stock)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace a product's fields
    pub async fn update(&self, id: i32, data: &CreateProduct) -> AppResult<Product> {
        let row = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, category = $3, price = $4, is_active = $5, stock = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.category)
        .bind(data.price)
        .bind(data.is_active)
        .bind(data.stock)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound("Producto no encontrado".to_string()))
    }

    /// Delete a product; consumptions referencing it keep it alive
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    AppError::Conflict(
                        "No se puede eliminar un producto con consumos registrados".to_string(),
                    )
                }
                other => AppError::Database(other),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Producto no encontrado".to_string()));
        }
        Ok(())
    }

    // ---- Consumptions ----

    /// Get consumption by ID
    pub async fn get_consumption(&self, id: i32) -> AppResult<Consumption> {
        sqlx::query_as::<_, Consumption>("SELECT * FROM consumptions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Consumo no encontrado".to_string()))
    }

    /// List consumptions, newest first
    pub async fn list_consumptions(
        &self,
        query: &ConsumptionQuery,
    ) -> AppResult<Vec<ConsumptionDetails>> {
        let rows = sqlx::query_as::<_, ConsumptionDetails>(
            r#"
            SELECT cs.id, cs.booking_id, cs.product_id, p.name AS product_name,
                   p.category AS product_category, cs.quantity, cs.unit_price,
                   cs.total_price, cs.created_at
            FROM consumptions cs
            JOIN products p ON cs.product_id = p.id
            WHERE ($1::int IS NULL OR cs.booking_id = $1)
              AND ($2::int IS NULL OR cs.product_id = $2)
            ORDER BY cs.created_at DESC
            "#,
        )
        .bind(query.booking)
        .bind(query.product)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a consumption. Decrements tracked stock and, when the booking
    /// already has a closure, resynchronizes its consumption totals.
    pub async fn create_consumption(
        &self,
        booking_id: i32,
        product_id: i32,
        quantity: i32,
        unit_price: Decimal,
    ) -> AppResult<Consumption> {
        let mut tx = self.pool.begin().await?;

        // Lock the product row while checking stock
        let stock: Option<i32> = sqlx::query_scalar(
            "SELECT stock FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Producto no encontrado".to_string()))?;

        if let Some(stock) = stock {
            if stock < quantity {
                return Err(AppError::BusinessRule(format!(
                    "Stock insuficiente. Disponible: {}",
                    stock
                )));
            }
            sqlx::query("UPDATE products SET stock = stock - $2, updated_at = NOW() WHERE id = $1")
                .bind(product_id)
                .bind(quantity)
                .execute(&mut *tx)
                .await?;
        }

        let total_price = unit_price * Decimal::from(quantity);

        let consumption = sqlx::query_as::<_, Consumption>(
            r#"
            INSERT INTO consumptions (booking_id, product_id, quantity, unit_price, total_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(total_price)
        .fetch_one(&mut *tx)
        .await?;

        Self::resync_closure(&mut tx, booking_id).await?;

        tx.commit().await?;
        Ok(consumption)
    }

    /// Delete a consumption, restoring tracked stock and resyncing the
    /// booking's closure totals.
    pub async fn delete_consumption(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let consumption = sqlx::query_as::<_, Consumption>(
            "SELECT * FROM consumptions WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Consumo no encontrado".to_string()))?;

        sqlx::query("DELETE FROM consumptions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE products SET stock = stock + $2, updated_at = NOW()
            WHERE id = $1 AND stock IS NOT NULL
            "#,
        )
        .bind(consumption.product_id)
        .bind(consumption.quantity)
        .execute(&mut *tx)
        .await?;

        Self::resync_closure(&mut tx, consumption.booking_id).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Recompute a closed booking's consumptions_amount/total_amount after a
    /// consumption change; no-op when the booking has no closure yet.
    async fn resync_closure(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        booking_id: i32,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE booking_closures bc
            SET consumptions_amount = totals.amount,
                total_amount = bc.booking_amount + totals.amount
            FROM (
                SELECT COALESCE(SUM(total_price), 0) AS amount
                FROM consumptions
                WHERE booking_id = $1
            ) AS totals
            WHERE bc.booking_id = $1
            "#,
        )
        .bind(booking_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
