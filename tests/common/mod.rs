//! Shared fixtures for the inventory integration tests.
//!
//! Provides `setup_sample_inventory()` which builds an [`Inventory`] over an
//! empty [`MemoryGateway`] and creates three sample products through the
//! public API.

#![allow(dead_code)]

use std::collections::HashMap;

use inventory_sdk::{Inventory, MemoryGateway, Product};

/// The sample products as returned by `create_product`.
pub struct Sample {
    pub widget: Product,
    pub gadget: Product,
    pub sprocket: Product,
}

pub fn empty_inventory() -> Inventory {
    Inventory::builder()
        .gateway(MemoryGateway::new())
        .build()
        .unwrap()
}

pub fn setup_sample_inventory() -> (Inventory, Sample) {
    let inventory = empty_inventory();

    let widget = inventory
        .create_product(product(
            "tool",
            "Acme",
            "Widget",
            "X1",
            5,
            "Globex",
            &[("color", "red")],
        ))
        .unwrap();
    let gadget = inventory
        .create_product(product(
            "tool",
            "Acme",
            "Gadget",
            "G2",
            12,
            "Initech",
            &[("color", "blue"), ("size", "L")],
        ))
        .unwrap();
    let sprocket = inventory
        .create_product(product(
            "part",
            "Umbrella",
            "Sprocket",
            "S9",
            2,
            "Globex",
            &[],
        ))
        .unwrap();

    (
        inventory,
        Sample {
            widget,
            gadget,
            sprocket,
        },
    )
}

pub fn product(
    product_type: &str,
    brand: &str,
    name: &str,
    model: &str,
    stock: i64,
    supplier: &str,
    specs: &[(&str, &str)],
) -> Product {
    Product {
        product_type: product_type.to_string(),
        brand: brand.to_string(),
        name: name.to_string(),
        model: model.to_string(),
        stock,
        supplier: supplier.to_string(),
        specs: specs_of(specs),
        warranty: "2 years".to_string(),
        ..Default::default()
    }
}

pub fn specs_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Sorted ids of a result set, for order-independent comparisons.
pub fn ids(products: &[Product]) -> Vec<String> {
    let mut ids: Vec<String> = products.iter().map(|p| p.id.clone()).collect();
    ids.sort();
    ids
}

pub fn sorted<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    let mut ids: Vec<String> = ids.iter().map(|s| s.as_ref().to_string()).collect();
    ids.sort();
    ids
}
