mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use inventory_sdk::{AsyncInventory, InventoryConfig};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = InventoryConfig::from_env().expect("Invalid configuration");
    let addr = config.listen_addr.clone();

    info!(dsn = %config.dsn, index = %config.index, "initializing inventory");
    let inventory = AsyncInventory::builder()
        .config(config)
        .build()
        .await
        .expect("Failed to initialize inventory");

    let state = Arc::new(AppState { inventory });

    let api = Router::new()
        .route(
            "/product",
            post(routes::products::create_product).get(routes::products::list_products),
        )
        .route(
            "/product/{id}",
            get(routes::products::get_product)
                .patch(routes::products::update_product)
                .delete(routes::products::delete_product),
        )
        .route("/analytics/stock", get(routes::analytics::low_stock))
        .route("/analytics/search", post(routes::analytics::search));

    let app = Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
