//! Product <-> document mapping and identity assignment.

mod common;

use inventory_sdk::gateway::elastic::parse_get_response;
use inventory_sdk::mapper::{assign_identity, display_name, from_document, to_document};
use inventory_sdk::{Product, RawHit};
use serde_json::json;

fn sample() -> Product {
    Product {
        id: "client-supplied".into(),
        note: "boxed".into(),
        ..common::product(
            "tool",
            "Acme",
            "Widget",
            "X1",
            5,
            "Globex",
            &[("color", "red")],
        )
    }
}

// ---------------------------------------------------------------------------
// to_document
// ---------------------------------------------------------------------------

#[test]
fn document_keeps_raw_name_and_derives_title() {
    let doc = to_document(&sample());
    assert_eq!(doc.name, "Widget");
    assert_eq!(doc.title, "Acme Widget X1");
    assert_eq!(doc.stock, 5);
    assert_eq!(doc.specs, common::specs_of(&[("color", "red")]));
}

#[test]
fn document_body_has_no_identifier() {
    let body = serde_json::to_value(to_document(&sample())).unwrap();
    assert!(body.get("id").is_none());
    assert_eq!(body["type"], "tool");
    assert_eq!(body["title"], "Acme Widget X1");
}

#[test]
fn display_name_with_missing_brand() {
    let product = Product {
        name: "Widget".into(),
        model: "X1".into(),
        ..Default::default()
    };
    assert_eq!(display_name(&product), "Widget X1");
}

// ---------------------------------------------------------------------------
// from_document
// ---------------------------------------------------------------------------

#[test]
fn document_id_wins_over_body_id() {
    let body = json!({
        "_index": "inventory",
        "_id": "doc-7",
        "found": true,
        "_source": {
            "id": "stale-id",
            "type": "tool",
            "brand": "Acme",
            "name": "Widget",
            "title": "Acme Widget X1",
            "model": "X1",
            "stock": 5
        }
    })
    .to_string();
    let hit = parse_get_response(&body).unwrap().unwrap();
    let product = from_document(hit);
    assert_eq!(product.id, "doc-7");
    assert_eq!(product.name, "Widget");
    assert!(product.specs.is_empty());
}

#[test]
fn round_trip_preserves_fields_and_assigns_identity() {
    let original = sample();
    let created = assign_identity(original.clone());

    assert!(!created.id.is_empty());
    assert_ne!(created.id, "client-supplied");
    assert!(created.date_added.is_some());

    let restored = from_document(RawHit {
        id: created.id.clone(),
        source: to_document(&created),
    });

    assert_eq!(restored.id, created.id);
    assert_eq!(restored.date_added, created.date_added);
    assert_eq!(
        Product {
            id: original.id.clone(),
            date_added: original.date_added,
            ..restored
        },
        original
    );
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

#[test]
fn product_decodes_partial_payloads() {
    let product: Product = serde_json::from_value(json!({
        "brand": "Acme",
        "stock": 3,
        "specs": { "color": "red" },
        "dateAdded": "2024-01-02T03:04:05Z"
    }))
    .unwrap();
    assert_eq!(product.brand, "Acme");
    assert_eq!(product.stock, 3);
    assert_eq!(product.name, "");
    assert!(product.date_added.is_some());
}

#[test]
fn product_encodes_type_key() {
    let body = serde_json::to_value(sample()).unwrap();
    assert_eq!(body["type"], "tool");
    assert!(body.get("date_added").is_none());
}
