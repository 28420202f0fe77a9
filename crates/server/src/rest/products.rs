use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared_types::{AppError, FeatureRequest, Product, PublishRequest, UpsertProductRequest};

use super::{deleted, found, parse_id};
use crate::auth::extractors::AdminRequired;
use crate::db::AppState;
use crate::error_convert::ValidateRequest;

// ---------------------------------------------------------------------------
// GET /api/admin/products
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/products",
    responses(
        (status = 200, description = "All products, newest first", body = Vec<Product>)
    ),
    tag = "admin-products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    _admin: AdminRequired,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.store.list_products().await?))
}

// ---------------------------------------------------------------------------
// POST /api/admin/products
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = UpsertProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "admin-products"
)]
#[tracing::instrument(skip(state, _admin, body), fields(name = %body.name))]
pub async fn create_product(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Json(body): Json<UpsertProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    body.validate_request()?;
    let product = state.store.create_product(&body).await?;
    tracing::info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

// ---------------------------------------------------------------------------
// PUT /api/admin/products/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(("id" = String, Path, description = "Product UUID")),
    request_body = UpsertProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<UpsertProductRequest>,
) -> Result<Json<Product>, AppError> {
    let id = parse_id(&id)?;
    body.validate_request()?;
    let product = found(state.store.update_product(id, &body).await?, "Product")?;
    Ok(Json(product))
}

// ---------------------------------------------------------------------------
// PATCH /api/admin/products/{id}/publish
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/admin/products/{id}/publish",
    params(("id" = String, Path, description = "Product UUID")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Publish flag set", body = Product),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-products"
)]
pub async fn publish_product(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<PublishRequest>,
) -> Result<Json<Product>, AppError> {
    let id = parse_id(&id)?;
    let product = found(
        state.store.set_product_published(id, body.is_published).await?,
        "Product",
    )?;
    Ok(Json(product))
}

// ---------------------------------------------------------------------------
// PATCH /api/admin/products/{id}/feature
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/admin/products/{id}/feature",
    params(("id" = String, Path, description = "Product UUID")),
    request_body = FeatureRequest,
    responses(
        (status = 200, description = "Featured flag set", body = Product),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-products"
)]
pub async fn feature_product(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<FeatureRequest>,
) -> Result<Json<Product>, AppError> {
    let id = parse_id(&id)?;
    let product = found(
        state.store.set_product_featured(id, body.is_featured).await?,
        "Product",
    )?;
    Ok(Json(product))
}

// ---------------------------------------------------------------------------
// DELETE /api/admin/products/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(("id" = String, Path, description = "Product UUID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    deleted(state.store.delete_product(id).await?, "Product")
}
