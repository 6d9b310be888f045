//! Shared fixtures: a small sportswear catalog exercising every filterable
//! dimension.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use rummage::query::params::RawSearchParams;
use rummage::store::MemoryCatalog;
use rummage::types::{Category, EventType, Product, ProductEvent, Variant};
use rummage::SearchEngine;

pub fn ts(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap()
}

pub fn category(id: &str, name: &str, slug: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
    }
}

pub fn variant(size: &str, color: &str, sku: &str) -> Variant {
    Variant {
        size: Some(size.to_string()),
        color: Some(color.to_string()),
        sku: Some(sku.to_string()),
        inventory: 10,
    }
}

pub struct ProductSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub brand: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub category_id: &'static str,
    pub rating: f64,
    pub day: u32,
    pub variants: Vec<Variant>,
}

impl Default for ProductSpec {
    fn default() -> Self {
        ProductSpec {
            id: "p0",
            name: "Product",
            brand: "Brand",
            description: "",
            price: 50.0,
            category_id: "cat-shoes",
            rating: 0.0,
            day: 1,
            variants: Vec::new(),
        }
    }
}

pub fn product(spec: ProductSpec) -> Product {
    Product {
        id: spec.id.to_string(),
        name: spec.name.to_string(),
        brand: spec.brand.to_string(),
        description: spec.description.to_string(),
        price: spec.price,
        category_id: spec.category_id.to_string(),
        variants: spec.variants,
        rating: spec.rating,
        views: None,
        add_to_cart_count: None,
        purchase_count: None,
        popularity_score: None,
        created_at: ts(spec.day),
    }
}

pub fn event(product_id: &str, event_type: EventType, quantity: Option<u64>) -> ProductEvent {
    ProductEvent {
        product_id: product_id.to_string(),
        event_type,
        quantity,
        occurred_at: ts(15),
    }
}

/// Five products across two categories and three brands.
pub fn seeded_catalog() -> Arc<MemoryCatalog> {
    let catalog = MemoryCatalog::new();
    catalog.insert_category(category("cat-shoes", "Shoes", "shoes"));
    catalog.insert_category(category("cat-shirts", "Shirts", "shirts"));

    catalog.insert_product(product(ProductSpec {
        id: "p1",
        name: "Nike Air Max",
        brand: "Nike",
        description: "Classic Nike running shoe with visible air cushioning",
        price: 150.0,
        category_id: "cat-shoes",
        rating: 4.5,
        day: 5,
        variants: vec![variant("42", "Red", "NK-AM-42R"), variant("43", "Black", "NK-AM-43B")],
    }));
    catalog.insert_product(product(ProductSpec {
        id: "p2",
        name: "Adidas Ultraboost",
        brand: "Adidas",
        description: "Often compared with nike flagships in reviews",
        price: 180.0,
        category_id: "cat-shoes",
        rating: 4.8,
        day: 3,
        variants: vec![variant("42", "White", "AD-UB-42W")],
    }));
    catalog.insert_product(product(ProductSpec {
        id: "p3",
        name: "Nike Dri-FIT Tee",
        brand: "Nike",
        description: "Lightweight training shirt",
        price: 35.0,
        category_id: "cat-shirts",
        rating: 3.9,
        day: 8,
        variants: vec![variant("M", "Red", "NK-DF-MR"), variant("L", "Blue", "NK-DF-LB")],
    }));
    catalog.insert_product(product(ProductSpec {
        id: "p4",
        name: "Puma Suede Classic",
        brand: "Puma",
        description: "Iconic street shoe",
        price: 90.0,
        category_id: "cat-shoes",
        rating: 2.5,
        day: 2,
        variants: vec![variant("41", "Blue", "PM-SC-41B")],
    }));
    catalog.insert_product(product(ProductSpec {
        id: "p5",
        name: "Adidas Tiro Shirt",
        brand: "Adidas",
        description: "Training shirt",
        price: 40.0,
        category_id: "cat-shirts",
        rating: 4.1,
        day: 1,
        variants: vec![variant("M", "Black", "AD-TR-MB")],
    }));

    Arc::new(catalog)
}

pub fn engine(catalog: Arc<MemoryCatalog>) -> SearchEngine {
    SearchEngine::new(catalog)
}

pub fn params() -> RawSearchParams {
    RawSearchParams::default()
}

pub fn ids(page: &rummage::types::SearchPage) -> Vec<&str> {
    page.data.iter().map(|p| p.id.as_str()).collect()
}
