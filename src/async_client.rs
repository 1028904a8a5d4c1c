//! Async wrapper around [`Inventory`] for use in async runtimes (Tokio, etc.).
//!
//! Gateway calls block on network I/O, so every operation runs on the
//! blocking thread pool via [`tokio::task::spawn_blocking`], keeping the
//! async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use inventory_sdk::AsyncInventory;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let inventory = AsyncInventory::builder().build().await.unwrap();
//!     let low = inventory.low_stock(Some("5".to_string())).await.unwrap();
//!     println!("{} products running low", low.len());
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::config::InventoryConfig;
use crate::error::{InventoryError, Result};
use crate::gateway::IndexGateway;
use crate::models::{Product, ProductFilter};
use crate::{Inventory, InventoryBuilder};

// ---------------------------------------------------------------------------
// AsyncInventoryBuilder
// ---------------------------------------------------------------------------

/// Builder for [`AsyncInventory`].
///
/// Mirrors [`InventoryBuilder`], but `build()` is async. The HTTP gateway
/// owns a blocking client that must not be created on an async worker
/// thread, so construction runs on the blocking thread pool.
#[derive(Default)]
pub struct AsyncInventoryBuilder {
    inner: InventoryBuilder,
}

impl AsyncInventoryBuilder {
    pub fn config(mut self, config: InventoryConfig) -> Self {
        self.inner = self.inner.config(config);
        self
    }

    pub fn dsn(mut self, dsn: &str) -> Self {
        self.inner = self.inner.dsn(dsn);
        self
    }

    pub fn index(mut self, index: &str) -> Self {
        self.inner = self.inner.index(index);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Use a specific gateway instead of connecting from the DSN.
    pub fn gateway<G: IndexGateway + 'static>(mut self, gateway: G) -> Self {
        self.inner = self.inner.gateway(gateway);
        self
    }

    /// Build the async inventory on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncInventory> {
        let inner = self.inner;
        tokio::task::spawn_blocking(move || inner.build().map(AsyncInventory::new))
            .await
            .map_err(|e| InventoryError::Backend(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncInventory
// ---------------------------------------------------------------------------

/// Async wrapper around [`Inventory`].
///
/// Cheap to clone; clones share the same underlying inventory.
#[derive(Clone)]
pub struct AsyncInventory {
    inner: Arc<Inventory>,
}

impl AsyncInventory {
    /// Create a builder. Prefer this over [`new`](Self::new) inside a
    /// runtime, since it builds the gateway off the async threads.
    pub fn builder() -> AsyncInventoryBuilder {
        AsyncInventoryBuilder::default()
    }

    /// Wrap an inventory that was built outside the async runtime.
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inner: Arc::new(inventory),
        }
    }

    /// Run a sync inventory operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Inventory) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let inventory = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&inventory))
            .await
            .map_err(|e| InventoryError::Backend(format!("Task join error: {e}")))?
    }

    pub async fn create_product(&self, product: Product) -> Result<Product> {
        self.run(move |inv| inv.create_product(product)).await
    }

    pub async fn product(&self, id: String) -> Result<Product> {
        self.run(move |inv| inv.product(&id)).await
    }

    pub async fn products(&self) -> Result<Vec<Product>> {
        self.run(|inv| inv.products()).await
    }

    pub async fn update_product(&self, id: String, patch: Product) -> Result<Product> {
        self.run(move |inv| inv.update_product(&id, &patch)).await
    }

    pub async fn delete_product(&self, id: String) -> Result<()> {
        self.run(move |inv| inv.delete_product(&id)).await
    }

    pub async fn low_stock(&self, level: Option<String>) -> Result<Vec<Product>> {
        self.run(move |inv| inv.low_stock(level.as_deref())).await
    }

    pub async fn search(&self, filter: ProductFilter) -> Result<Vec<Product>> {
        self.run(move |inv| inv.search(&filter)).await
    }
}
