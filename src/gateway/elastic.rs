//! Elasticsearch-backed [`IndexGateway`] using a blocking HTTP client.
//!
//! Request bodies and response parsing are plain functions so they can be
//! checked without a running cluster.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{IndexGateway, RawHit};
use crate::error::{InventoryError, Result};
use crate::models::ProductDocument;
use crate::query::Clause;

/// Upper bound on hits returned by one search (the default result window).
pub const MAX_SEARCH_HITS: usize = 10_000;

/// Longest slice of an error body carried into a [`InventoryError::Backend`].
const ERROR_BODY_EXCERPT: usize = 512;

/// Talks to an Elasticsearch-compatible cluster.
pub struct ElasticGateway {
    client: Client,
    base: Url,
    index: String,
}

impl ElasticGateway {
    /// Create a gateway for `index` on the cluster at `dsn`.
    ///
    /// The DSN must be an absolute `http(s)` URL. `timeout` bounds every
    /// request.
    pub fn new(dsn: &str, index: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(dsn)
            .map_err(|e| InventoryError::Validation(format!("Invalid DSN '{}': {}", dsn, e)))?;
        if base.cannot_be_a_base() {
            return Err(InventoryError::Validation(format!(
                "DSN '{}' cannot be used as a base URL",
                dsn
            )));
        }
        if index.trim().is_empty() {
            return Err(InventoryError::Validation("Index name is empty".into()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            index: index.to_string(),
        })
    }

    /// The index this gateway reads and writes.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Build `{base}/{index}/{segments...}` with each segment escaped.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                InventoryError::Validation(format!("DSN '{}' cannot be a base URL", self.base))
            })?
            .pop_if_empty()
            .push(&self.index)
            .extend(segments);
        Ok(url)
    }
}

impl IndexGateway for ElasticGateway {
    fn upsert(&self, id: &str, document: &ProductDocument) -> Result<()> {
        let url = self.endpoint(&["_update", id])?;
        debug!(index = %self.index, id, "upserting document");
        let resp = self
            .client
            .post(url)
            .query(&[("refresh", "true")])
            .json(&upsert_body(document)?)
            .send()?;
        ensure_success("upsert", resp)?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<RawHit>> {
        let url = self.endpoint(&["_doc", id])?;
        let resp = self
            .client
            .get(url)
            .query(&[("realtime", "true")])
            .send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = ensure_success("get", resp)?.text()?;
        parse_get_response(&body)
    }

    fn search(&self, query: &Clause) -> Result<Vec<RawHit>> {
        let url = self.endpoint(&["_search"])?;
        let resp = self.client.post(url).json(&search_body(query)).send()?;
        let body = ensure_success("search", resp)?.text()?;
        let hits = parse_search_response(&body)?;
        debug!(index = %self.index, hits = hits.len(), "search complete");
        Ok(hits)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let url = self.endpoint(&["_doc", id])?;
        let resp = self
            .client
            .delete(url)
            .query(&[("refresh", "true")])
            .send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        ensure_success("delete", resp)?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Body of an `_update` call that creates the document when missing.
pub fn upsert_body(document: &ProductDocument) -> Result<Value> {
    Ok(json!({
        "doc": serde_json::to_value(document)?,
        "doc_as_upsert": true,
    }))
}

/// Body of a `_search` call for `query`.
pub fn search_body(query: &Clause) -> Value {
    let mut body = query.search_body();
    body["size"] = json!(MAX_SEARCH_HITS);
    body
}

#[derive(Deserialize)]
struct GetResponse {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source")]
    source: Option<ProductDocument>,
}

#[derive(Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source", default)]
    source: ProductDocument,
}

/// Parse a `GET _doc/{id}` response. Any `id` inside `_source` is ignored in
/// favour of `_id`.
pub fn parse_get_response(body: &str) -> Result<Option<RawHit>> {
    let resp: GetResponse = serde_json::from_str(body)?;
    match (resp.found, resp.source) {
        (true, Some(source)) => Ok(Some(RawHit {
            id: resp.id,
            source,
        })),
        _ => Ok(None),
    }
}

/// Parse a `_search` response into hits, preserving the backend's order.
pub fn parse_search_response(body: &str) -> Result<Vec<RawHit>> {
    let resp: SearchResponse = serde_json::from_str(body)?;
    Ok(resp
        .hits
        .hits
        .into_iter()
        .map(|hit| RawHit {
            id: hit.id,
            source: hit.source,
        })
        .collect())
}

/// Turn a non-success status into a [`InventoryError::Backend`].
fn ensure_success(operation: &str, resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    let excerpt: String = body.chars().take(ERROR_BODY_EXCERPT).collect();
    warn!(operation, %status, "index backend rejected request");
    Err(InventoryError::Backend(format!(
        "{} failed with status {}: {}",
        operation, status, excerpt
    )))
}
