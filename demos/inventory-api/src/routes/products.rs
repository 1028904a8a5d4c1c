use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use inventory_sdk::Product;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/v1/product
///
/// Create a product. Any `id` or `date_added` in the body is replaced.
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(product): Json<Product>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let created = state.inventory.create_product(product).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": created }))))
}

/// GET /api/v1/product
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let products = state.inventory.products().await?;
    let count = products.len();
    Ok(Json(json!({ "data": products, "count": count })))
}

/// GET /api/v1/product/{id}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let product = state.inventory.product(id).await?;
    Ok(Json(json!({ "data": product })))
}

/// PATCH /api/v1/product/{id}
///
/// Partial update: only non-empty fields of the body are applied.
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<Product>,
) -> Result<Json<Value>, AppError> {
    let updated = state.inventory.update_product(id, patch).await?;
    Ok(Json(json!({ "data": updated })))
}

/// DELETE /api/v1/product/{id}
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.inventory.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
