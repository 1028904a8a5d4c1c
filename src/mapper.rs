//! Conversion between the client-facing [`Product`] and the persisted
//! [`ProductDocument`], plus identity assignment on creation.

use chrono::Utc;
use uuid::Uuid;

use crate::gateway::RawHit;
use crate::models::{Product, ProductDocument};

/// Derived display name: brand, name and model joined by single spaces.
/// Blank parts are skipped.
pub fn display_name(product: &Product) -> String {
    [&product.brand, &product.name, &product.model]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the document body written to the index. The identifier is not part
/// of the body; it travels as the index document id.
pub fn to_document(product: &Product) -> ProductDocument {
    ProductDocument {
        product_type: product.product_type.clone(),
        brand: product.brand.clone(),
        name: product.name.clone(),
        title: display_name(product),
        model: product.model.clone(),
        stock: product.stock,
        specs: product.specs.clone(),
        warranty: product.warranty.clone(),
        supplier: product.supplier.clone(),
        date_added: product.date_added,
        note: product.note.clone(),
    }
}

/// Rebuild a [`Product`] from a search hit. The hit's document id is the only
/// source of identity.
pub fn from_document(hit: RawHit) -> Product {
    let RawHit { id, source } = hit;
    Product {
        id,
        product_type: source.product_type,
        brand: source.brand,
        name: source.name,
        model: source.model,
        stock: source.stock,
        specs: source.specs,
        warranty: source.warranty,
        supplier: source.supplier,
        date_added: source.date_added,
        note: source.note,
    }
}

/// Give a new product a fresh random identifier and stamp it with the
/// current time. Call once, at creation.
pub fn assign_identity(mut product: Product) -> Product {
    product.id = Uuid::new_v4().to_string();
    product.date_added = Some(Utc::now());
    product
}
