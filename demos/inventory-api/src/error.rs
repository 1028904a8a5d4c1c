use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// Unified error type that renders as a JSON `{"error": "..."}` response
/// with an appropriate HTTP status code.
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<inventory_sdk::InventoryError> for AppError {
    fn from(e: inventory_sdk::InventoryError) -> Self {
        match &e {
            inventory_sdk::InventoryError::NotFound(msg) => AppError::not_found(msg.clone()),
            _ if e.is_client_error() => AppError::bad_request(e.to_string()),
            _ => {
                tracing::error!(error = %e, "index backend failure");
                AppError::bad_gateway(e.to_string())
            }
        }
    }
}
