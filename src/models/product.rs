use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Product — External representation exchanged with clients
// ---------------------------------------------------------------------------

/// A product as clients send and receive it.
///
/// Every field is optional on the wire; missing fields take their zero value,
/// which the merge rules treat as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Server-assigned identifier. Ignored on create.
    pub id: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub brand: String,
    pub name: String,
    pub model: String,
    pub stock: i64,
    pub specs: HashMap<String, String>,
    pub warranty: String,
    pub supplier: String,
    #[serde(alias = "dateAdded", skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    pub note: String,
}

// ---------------------------------------------------------------------------
// ProductDocument — Persisted shape stored in the search index
// ---------------------------------------------------------------------------

/// The `_source` body of a product in the index.
///
/// Identity lives in the index document id, never in the body. `title` is the
/// derived `brand name model` display name targeted by free-text search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDocument {
    #[serde(rename = "type")]
    pub product_type: String,
    pub brand: String,
    pub name: String,
    pub title: String,
    pub model: String,
    pub stock: i64,
    pub specs: HashMap<String, String>,
    pub warranty: String,
    pub supplier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    pub note: String,
}

/// A value of an indexed field, as seen by query evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
}

impl ProductDocument {
    /// Look up an indexed field by name. A trailing `.keyword` selects the
    /// same value as the base field.
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let base = name
            .strip_suffix(crate::config::KEYWORD_SUFFIX)
            .unwrap_or(name);
        let text = match base {
            "type" => &self.product_type,
            "brand" => &self.brand,
            "name" => &self.name,
            "title" => &self.title,
            "model" => &self.model,
            "warranty" => &self.warranty,
            "supplier" => &self.supplier,
            "note" => &self.note,
            "stock" => return Some(FieldValue::Integer(self.stock)),
            other => {
                return other
                    .strip_prefix("specs.")
                    .and_then(|key| self.specs.get(key))
                    .map(|v| FieldValue::Text(v.as_str()));
            }
        };
        Some(FieldValue::Text(text.as_str()))
    }
}
