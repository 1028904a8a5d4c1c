//! Structured search-query construction.
//!
//! Queries are built as a [`Clause`] tree and only turned into the search
//! backend's JSON at the gateway boundary, so user-supplied values are never
//! spliced into query text.
//!
//! # Example
//!
//! ```rust
//! use inventory_sdk::query::BoolQueryBuilder;
//! let query = BoolQueryBuilder::new()
//!     .match_fuzzy("title", "Acme Widget")
//!     .term("brand.keyword", "Acme")
//!     .range_gte("stock", 1)
//!     .build();
//! let body = query.search_body();
//! assert!(body["query"]["bool"]["must"].is_array());
//! ```

use serde_json::{json, Map, Value};

use crate::config::{self, FIELD_STOCK, FIELD_TITLE};
use crate::models::ProductFilter;

/// Fuzziness sent with typo-tolerant matches.
pub const DEFAULT_FUZZINESS: &str = "AUTO";

// ---------------------------------------------------------------------------
// Clause
// ---------------------------------------------------------------------------

/// One node of a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Matches every document.
    MatchAll,
    /// Analyzed text match, optionally typo-tolerant.
    Match {
        field: String,
        value: String,
        fuzzy: bool,
    },
    /// Exact match on a non-analyzed (keyword) field.
    Term { field: String, value: String },
    /// Inclusive integer bounds. A missing bound is open.
    Range {
        field: String,
        gte: Option<i64>,
        lte: Option<i64>,
    },
    /// Conjunction of every clause in `must`.
    Bool { must: Vec<Clause> },
}

impl Clause {
    /// Render this clause in the Elasticsearch query DSL.
    pub fn to_json(&self) -> Value {
        match self {
            Clause::MatchAll => json!({ "match_all": {} }),
            Clause::Match {
                field,
                value,
                fuzzy,
            } => {
                let mut inner = Map::new();
                inner.insert("query".to_string(), json!(value));
                if *fuzzy {
                    inner.insert("fuzziness".to_string(), json!(DEFAULT_FUZZINESS));
                }
                json!({ "match": { field.as_str(): Value::Object(inner) } })
            }
            Clause::Term { field, value } => json!({ "term": { field.as_str(): value } }),
            Clause::Range { field, gte, lte } => {
                let mut bounds = Map::new();
                if let Some(n) = gte {
                    bounds.insert("gte".to_string(), json!(n));
                }
                if let Some(n) = lte {
                    bounds.insert("lte".to_string(), json!(n));
                }
                json!({ "range": { field.as_str(): Value::Object(bounds) } })
            }
            Clause::Bool { must } => {
                let must: Vec<Value> = must.iter().map(Clause::to_json).collect();
                json!({ "bool": { "must": must } })
            }
        }
    }

    /// Wrap the clause as a complete `_search` request body.
    pub fn search_body(&self) -> Value {
        json!({ "query": self.to_json() })
    }
}

// ---------------------------------------------------------------------------
// BoolQueryBuilder
// ---------------------------------------------------------------------------

/// Collects clauses into a boolean "must" query.
///
/// Methods return `&mut Self` for chaining. [`build`](Self::build) never
/// yields an empty `must` list: with nothing added it emits a single
/// match-all clause.
#[derive(Debug, Clone, Default)]
pub struct BoolQueryBuilder {
    must: Vec<Clause>,
}

impl BoolQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary clause.
    pub fn must(&mut self, clause: Clause) -> &mut Self {
        self.must.push(clause);
        self
    }

    /// Append a match-all placeholder.
    pub fn match_all(&mut self) -> &mut Self {
        self.must(Clause::MatchAll)
    }

    /// Append a typo-tolerant text match with default fuzziness.
    pub fn match_fuzzy(&mut self, field: &str, value: &str) -> &mut Self {
        self.must(Clause::Match {
            field: field.to_string(),
            value: value.to_string(),
            fuzzy: true,
        })
    }

    /// Append an exact term match.
    pub fn term(&mut self, field: &str, value: &str) -> &mut Self {
        self.must(Clause::Term {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    /// Append `field >= value`.
    pub fn range_gte(&mut self, field: &str, value: i64) -> &mut Self {
        self.must(Clause::Range {
            field: field.to_string(),
            gte: Some(value),
            lte: None,
        })
    }

    /// Append `field <= value`.
    pub fn range_lte(&mut self, field: &str, value: i64) -> &mut Self {
        self.must(Clause::Range {
            field: field.to_string(),
            gte: None,
            lte: Some(value),
        })
    }

    /// Number of clauses collected so far.
    pub fn len(&self) -> usize {
        self.must.len()
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
    }

    pub fn build(&self) -> Clause {
        if self.must.is_empty() {
            return Clause::Bool {
                must: vec![Clause::MatchAll],
            };
        }
        Clause::Bool {
            must: self.must.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Query constructors
// ---------------------------------------------------------------------------

/// Query matching every document.
pub fn build_match_all() -> Clause {
    Clause::MatchAll
}

/// Query matching documents whose `field` is at most `threshold`.
pub fn build_range_at_most(field: &str, threshold: u64) -> Clause {
    Clause::Range {
        field: field.to_string(),
        gte: None,
        lte: Some(i64::try_from(threshold).unwrap_or(i64::MAX)),
    }
}

/// Translate a [`ProductFilter`] into a boolean "must" query.
///
/// Clauses are emitted in a fixed order: the text clause (or a match-all
/// placeholder), then exact terms for type, brand, model and supplier, then
/// the lower and upper stock bounds as two independent ranges. Inverted
/// bounds are not rejected; they simply match nothing.
pub fn build_from_filter(filter: &ProductFilter) -> Clause {
    let mut qb = BoolQueryBuilder::new();

    match filter.search_string {
        Some(ref text) => qb.match_fuzzy(FIELD_TITLE, text),
        None => qb.match_all(),
    };

    let exact = [
        (config::FIELD_TYPE, &filter.product_type),
        (config::FIELD_BRAND, &filter.product_brand),
        (config::FIELD_MODEL, &filter.product_model),
        (config::FIELD_SUPPLIER, &filter.supplier),
    ];
    for (field, value) in exact {
        if let Some(value) = value {
            qb.term(&config::keyword_field(field), value);
        }
    }

    if let Some(min) = filter.min_stock {
        qb.range_gte(FIELD_STOCK, min);
    }
    if let Some(max) = filter.max_stock {
        qb.range_lte(FIELD_STOCK, max);
    }

    qb.build()
}
