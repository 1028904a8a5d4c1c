//! Partial-update merge rules.

mod common;

use chrono::{TimeZone, Utc};
use inventory_sdk::merge::merge;
use inventory_sdk::Product;

fn target() -> Product {
    Product {
        id: "prod-1".into(),
        product_type: "tool".into(),
        brand: "Acme".into(),
        name: "Widget".into(),
        model: "X1".into(),
        stock: 7,
        specs: common::specs_of(&[("color", "red")]),
        warranty: "1 year".into(),
        supplier: "Globex".into(),
        date_added: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
        note: "fragile".into(),
    }
}

// ---------------------------------------------------------------------------
// Scalar fields
// ---------------------------------------------------------------------------

#[test]
fn empty_patch_changes_nothing() {
    assert_eq!(merge(target(), &Product::default()), target());
}

#[test]
fn non_empty_strings_overwrite() {
    let patch = Product {
        brand: "Globex".into(),
        note: "handle with care".into(),
        ..Default::default()
    };
    let merged = merge(target(), &patch);
    assert_eq!(merged.brand, "Globex");
    assert_eq!(merged.note, "handle with care");
    assert_eq!(merged.name, "Widget");
    assert_eq!(merged.supplier, "Globex");
    assert_eq!(merged.warranty, "1 year");
}

#[test]
fn patch_id_is_never_applied() {
    let patch = Product {
        id: "someone-else".into(),
        ..Default::default()
    };
    assert_eq!(merge(target(), &patch).id, "prod-1");
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

#[test]
fn non_zero_stock_overwrites() {
    let patch = Product {
        stock: 42,
        ..Default::default()
    };
    assert_eq!(merge(target(), &patch).stock, 42);
}

/// Zero means "not supplied", so an update cannot zero out stock. This is the
/// current policy and is still under review.
#[test]
fn zero_stock_leaves_target_unchanged() {
    for prior in [0, 1, 7, 1_000] {
        let mut t = target();
        t.stock = prior;
        let patch = Product {
            stock: 0,
            ..Default::default()
        };
        assert_eq!(merge(t, &patch).stock, prior);
    }
}

// ---------------------------------------------------------------------------
// Date added
// ---------------------------------------------------------------------------

#[test]
fn date_added_only_overwritten_when_present() {
    assert_eq!(merge(target(), &Product::default()).date_added, target().date_added);

    let later = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let patch = Product {
        date_added: Some(later),
        ..Default::default()
    };
    assert_eq!(merge(target(), &patch).date_added, Some(later));
}

// ---------------------------------------------------------------------------
// Specs
// ---------------------------------------------------------------------------

#[test]
fn specs_merge_key_by_key() {
    let patch = Product {
        specs: common::specs_of(&[("color", "blue"), ("size", "M")]),
        ..Default::default()
    };
    let merged = merge(target(), &patch);
    assert_eq!(merged.specs, common::specs_of(&[("color", "blue"), ("size", "M")]));
}

#[test]
fn specs_keys_absent_from_patch_are_kept() {
    let patch = Product {
        specs: common::specs_of(&[("size", "M")]),
        ..Default::default()
    };
    let merged = merge(target(), &patch);
    assert_eq!(merged.specs, common::specs_of(&[("color", "red"), ("size", "M")]));
}

#[test]
fn empty_spec_value_does_not_delete() {
    let patch = Product {
        specs: common::specs_of(&[("color", "")]),
        ..Default::default()
    };
    let merged = merge(target(), &patch);
    assert_eq!(merged.specs, common::specs_of(&[("color", "red")]));
}

#[test]
fn specs_added_to_product_without_specs() {
    let mut t = target();
    t.specs.clear();
    let patch = Product {
        specs: common::specs_of(&[("voltage", "12V"), ("plug", "")]),
        ..Default::default()
    };
    let merged = merge(t, &patch);
    assert_eq!(merged.specs, common::specs_of(&[("voltage", "12V")]));
}
