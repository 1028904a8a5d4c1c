//! Field-level partial updates.
//!
//! A patch only overwrites what it actually carries: a field is "carried"
//! when it holds something other than its zero value. Two consequences are
//! deliberate and covered by tests:
//!
//! - stock cannot be set to `0` through an update;
//! - an empty spec value does not remove the existing key.

use crate::models::Product;

/// Apply `patch` onto `target` and return the updated entity.
///
/// The identifier is never taken from the patch. No I/O happens here; the
/// caller fetches `target` and persists the result.
pub fn merge(mut target: Product, patch: &Product) -> Product {
    overwrite_if_set(&mut target.product_type, &patch.product_type);
    overwrite_if_set(&mut target.brand, &patch.brand);
    overwrite_if_set(&mut target.name, &patch.name);
    overwrite_if_set(&mut target.model, &patch.model);
    overwrite_if_set(&mut target.warranty, &patch.warranty);
    overwrite_if_set(&mut target.supplier, &patch.supplier);
    overwrite_if_set(&mut target.note, &patch.note);

    if patch.stock != 0 {
        target.stock = patch.stock;
    }

    if patch.date_added.is_some() {
        target.date_added = patch.date_added;
    }

    for (key, value) in &patch.specs {
        if !value.is_empty() {
            target.specs.insert(key.clone(), value.clone());
        }
    }

    target
}

fn overwrite_if_set(target: &mut String, incoming: &str) {
    if !incoming.is_empty() {
        *target = incoming.to_string();
    }
}
