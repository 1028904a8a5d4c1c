use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::Json;
use inventory_sdk::ProductFilter;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StockParams {
    pub level: Option<String>,
}

/// GET /api/v1/analytics/stock?level=3
///
/// Products with stock at or below `level` (default 3).
pub async fn low_stock(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StockParams>,
) -> Result<Json<Value>, AppError> {
    let products = state.inventory.low_stock(params.level).await?;
    let count = products.len();
    Ok(Json(json!({ "data": products, "count": count })))
}

/// POST /api/v1/analytics/search
///
/// Body is a JSON filter; an empty body applies no constraints.
pub async fn search(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let filter: ProductFilter = if body.iter().all(u8::is_ascii_whitespace) {
        ProductFilter::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::bad_request(format!("Invalid filter: {e}")))?
    };

    let products = state.inventory.search(filter).await?;
    let count = products.len();
    Ok(Json(json!({ "data": products, "count": count })))
}
