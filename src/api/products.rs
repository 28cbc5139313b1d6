//! Product management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::product::{CreateProduct, ProductDetails, ProductQuery},
    AppState,
};

use super::AuthenticatedUser;

/// List products
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    security(("bearer_auth" = [])),
    params(ProductQuery),
    responses(
        (status = 200, description = "Products", body = Vec<ProductDetails>)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<ProductDetails>>> {
    let products = state.services.products.list(&query).await?;
    Ok(Json(products))
}

/// Get one product
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ProductDetails),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ProductDetails>> {
    let product = state.services.products.get(id).await?;
    Ok(Json(product))
}

/// Create a product (admin only)
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    security(("bearer_auth" = [])),
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductDetails),
        (status = 400, description = "Invalid data"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<ProductDetails>)> {
    claims.require_admin()?;
    let product = state.services.products.create(&request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product (admin only)
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductDetails),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<CreateProduct>,
) -> AppResult<Json<ProductDetails>> {
    claims.require_admin()?;
    let product = state.services.products.update(id, &request).await?;
    Ok(Json(product))
}

/// Delete a product (admin only)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product has consumptions")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
