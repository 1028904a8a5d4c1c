use serde::{Deserialize, Serialize};

/// Optional search constraints for a product search.
///
/// Every field is optional. `None` means "no constraint on this dimension",
/// never "match empty". Unknown keys (such as the legacy `product_name`) are
/// ignored when decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFilter {
    /// Typo-tolerant text matched against the product display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

impl ProductFilter {
    /// True when no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
