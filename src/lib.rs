//! Inventory SDK for Rust.
//!
//! Stores products in a document-search index and answers listing,
//! low-stock and filtered-search requests against it. The core is a set of
//! pure pieces: [`query`] turns filters into structured search queries,
//! [`mapper`] converts between client products and index documents, and
//! [`merge`] applies partial updates. [`Inventory`] wires them to an
//! [`IndexGateway`].
//!
//! # Quick start
//!
//! ```
//! use inventory_sdk::{Inventory, MemoryGateway, Product, ProductFilter};
//!
//! let inventory = Inventory::builder()
//!     .gateway(MemoryGateway::new())
//!     .build()
//!     .unwrap();
//!
//! let widget = inventory
//!     .create_product(Product {
//!         brand: "Acme".into(),
//!         name: "Widget".into(),
//!         model: "X1".into(),
//!         stock: 5,
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! let low = inventory.low_stock(Some("10")).unwrap();
//! assert_eq!(low[0].id, widget.id);
//!
//! let found = inventory
//!     .search(&ProductFilter {
//!         product_brand: Some("Acme".into()),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! assert_eq!(found.len(), 1);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod mapper;
pub mod merge;
pub mod models;
pub mod query;

#[cfg(feature = "async")]
pub use async_client::{AsyncInventory, AsyncInventoryBuilder};
pub use config::InventoryConfig;
pub use error::{InventoryError, Result};
pub use gateway::{ElasticGateway, IndexGateway, MemoryGateway, RawHit};
pub use models::{Product, ProductDocument, ProductFilter};
pub use query::{BoolQueryBuilder, Clause};

use std::fmt;
use std::time::Duration;

use tracing::{debug, info};

// ---------------------------------------------------------------------------
// InventoryBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`Inventory`].
///
/// Without an explicit [`gateway`](Self::gateway), `build()` connects to the
/// configured DSN: `memory` selects a fresh [`MemoryGateway`], anything else
/// an [`ElasticGateway`].
#[derive(Default)]
pub struct InventoryBuilder {
    config: InventoryConfig,
    gateway: Option<Box<dyn IndexGateway>>,
}

impl InventoryBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: InventoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Base URL of the search backend.
    pub fn dsn(mut self, dsn: &str) -> Self {
        self.config.dsn = dsn.to_string();
        self
    }

    /// Index holding product documents. Defaults to `inventory`.
    pub fn index(mut self, index: &str) -> Self {
        self.config.index = index.to_string();
        self
    }

    /// Per-request deadline for backend calls. Defaults to 100 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Use a specific gateway instead of connecting from the DSN.
    pub fn gateway<G: IndexGateway + 'static>(mut self, gateway: G) -> Self {
        self.gateway = Some(Box::new(gateway));
        self
    }

    pub fn build(self) -> Result<Inventory> {
        let gateway = match self.gateway {
            Some(gateway) => gateway,
            None if self.config.is_memory() => Box::new(MemoryGateway::new()),
            None => Box::new(ElasticGateway::new(
                &self.config.dsn,
                &self.config.index,
                self.config.timeout,
            )?),
        };
        info!(dsn = %self.config.dsn, index = %self.config.index, "inventory ready");
        Ok(Inventory {
            config: self.config,
            gateway,
        })
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Product service: CRUD, low-stock reporting and filtered search.
///
/// Every operation is a single synchronous round trip (two for updates) to
/// the gateway. Updates read, merge and write without any version check, so
/// concurrent updates of the same product resolve as last writer wins.
pub struct Inventory {
    config: InventoryConfig,
    gateway: Box<dyn IndexGateway>,
}

impl Inventory {
    /// Create a new builder.
    pub fn builder() -> InventoryBuilder {
        InventoryBuilder::default()
    }

    /// The configuration this inventory was built with.
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// The underlying gateway, for advanced usage.
    pub fn gateway(&self) -> &dyn IndexGateway {
        self.gateway.as_ref()
    }

    // -- Products ----------------------------------------------------------

    /// Store a new product under a freshly generated id.
    ///
    /// Any id or creation time supplied by the client is replaced.
    pub fn create_product(&self, product: Product) -> Result<Product> {
        let product = mapper::assign_identity(product);
        self.gateway
            .upsert(&product.id, &mapper::to_document(&product))?;
        info!(id = %product.id, "product created");
        Ok(product)
    }

    /// Fetch one product.
    pub fn product(&self, id: &str) -> Result<Product> {
        self.gateway
            .get(id)?
            .map(mapper::from_document)
            .ok_or_else(|| not_found(id))
    }

    /// List every product.
    pub fn products(&self) -> Result<Vec<Product>> {
        self.run(&query::build_match_all())
    }

    /// Apply a partial update to an existing product.
    ///
    /// Only non-empty fields of `patch` are applied; see [`merge::merge`].
    /// The patch's own id is ignored.
    pub fn update_product(&self, id: &str, patch: &Product) -> Result<Product> {
        let current = self.product(id)?;
        let merged = merge::merge(current, patch);
        self.gateway.upsert(id, &mapper::to_document(&merged))?;
        info!(id, "product updated");
        Ok(merged)
    }

    /// Remove a product.
    pub fn delete_product(&self, id: &str) -> Result<()> {
        if !self.gateway.delete(id)? {
            return Err(not_found(id));
        }
        info!(id, "product deleted");
        Ok(())
    }

    // -- Analytics ---------------------------------------------------------

    /// Products whose stock is at most `level`.
    ///
    /// `level` is the raw request parameter: absent or blank falls back to
    /// [`config::DEFAULT_LOW_STOCK_LEVEL`], anything that is not a
    /// non-negative integer is rejected.
    pub fn low_stock(&self, level: Option<&str>) -> Result<Vec<Product>> {
        self.low_stock_at(parse_stock_level(level)?)
    }

    /// Products whose stock is at most `level`.
    pub fn low_stock_at(&self, level: u64) -> Result<Vec<Product>> {
        self.run(&query::build_range_at_most(config::FIELD_STOCK, level))
    }

    /// Products satisfying every constraint in `filter`.
    pub fn search(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        self.run(&query::build_from_filter(filter))
    }

    /// Run an arbitrary query and return the raw hits.
    pub fn raw_search(&self, query: &Clause) -> Result<Vec<RawHit>> {
        self.gateway.search(query)
    }

    fn run(&self, query: &Clause) -> Result<Vec<Product>> {
        let hits = self.gateway.search(query)?;
        debug!(hits = hits.len(), "query executed");
        Ok(hits.into_iter().map(mapper::from_document).collect())
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inventory(dsn={}, index={})",
            self.config.dsn, self.config.index
        )
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a low-stock threshold supplied as text.
pub fn parse_stock_level(level: Option<&str>) -> Result<u64> {
    match level.map(str::trim).filter(|l| !l.is_empty()) {
        None => Ok(config::DEFAULT_LOW_STOCK_LEVEL),
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            InventoryError::Validation(format!(
                "Stock level must be a non-negative integer, got '{}'",
                raw
            ))
        }),
    }
}

fn not_found(id: &str) -> InventoryError {
    InventoryError::NotFound(format!("No product with id '{}'", id))
}
