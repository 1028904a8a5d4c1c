/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Async inventory service. Dispatches blocking index calls to the
    /// blocking thread pool internally.
    pub inventory: inventory_sdk::AsyncInventory,
}
