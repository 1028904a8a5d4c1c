//! Index gateways: the boundary between the inventory core and the search
//! backend that stores product documents.
//!
//! [`ElasticGateway`] talks to an Elasticsearch-compatible cluster over HTTP.
//! [`MemoryGateway`] keeps documents in process and evaluates the same
//! [`Clause`] trees, which makes it suitable for tests and offline demos.

pub mod elastic;
pub mod memory;

pub use elastic::ElasticGateway;
pub use memory::MemoryGateway;

use crate::error::Result;
use crate::models::ProductDocument;
use crate::query::Clause;

/// A stored document together with the id the index keeps it under.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHit {
    pub id: String,
    pub source: ProductDocument,
}

/// Operations the inventory core needs from a search index.
///
/// Writes must be visible to the next read of the same id. Implementations
/// provide no compare-and-swap: concurrent fetch-merge-write cycles on one id
/// resolve as last writer wins.
pub trait IndexGateway: Send + Sync {
    /// Create or replace the document stored under `id`.
    fn upsert(&self, id: &str, document: &ProductDocument) -> Result<()>;

    /// Fetch a document by id. `Ok(None)` when the id is unknown.
    fn get(&self, id: &str) -> Result<Option<RawHit>>;

    /// Run a query and return matching documents in index-defined order.
    fn search(&self, query: &Clause) -> Result<Vec<RawHit>>;

    /// Remove a document. `Ok(false)` when the id was unknown.
    fn delete(&self, id: &str) -> Result<bool>;
}
