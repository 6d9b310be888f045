//! Route-level tests driven through the router with `tower::ServiceExt`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use rummage::store::MemoryCatalog;
use rummage::types::{Category, EventType, Product, ProductEvent, Variant};
use rummage::SearchEngine;
use rummage_http::auth::{AdminGate, OpenGate, TokenAdminGate};
use rummage_http::handlers::AppState;
use rummage_http::router;

fn sample_product(id: &str, name: &str, brand: &str, price: f64, day: u32) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        description: String::new(),
        price,
        category_id: "cat-shoes".to_string(),
        variants: vec![Variant {
            size: Some("42".to_string()),
            color: Some("Black".to_string()),
            sku: Some(format!("{}-42B", id)),
            inventory: 5,
        }],
        rating: 4.0,
        views: None,
        add_to_cart_count: None,
        purchase_count: None,
        popularity_score: None,
        created_at: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
    }
}

fn app(gate: Arc<dyn AdminGate>) -> axum::Router {
    let catalog = MemoryCatalog::new();
    catalog.insert_category(Category {
        id: "cat-shoes".to_string(),
        name: "Shoes".to_string(),
        slug: "shoes".to_string(),
    });
    catalog.insert_product(sample_product("p1", "Nike Air Max", "Nike", 150.0, 5));
    catalog.insert_product(sample_product("p2", "Puma Suede", "Puma", 90.0, 3));
    catalog.record_event(ProductEvent {
        product_id: "p1".to_string(),
        event_type: EventType::Purchase,
        quantity: Some(2),
        occurred_at: Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap(),
    });

    let engine = Arc::new(SearchEngine::new(Arc::new(catalog)));
    router(Arc::new(AppState::new(engine, gate)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let response = app(Arc::new(OpenGate))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn search_returns_the_success_envelope() {
    let response = app(Arc::new(OpenGate))
        .oneshot(Request::get("/search?q=nike").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["data"][0]["id"], "p1");
}

#[tokio::test]
async fn invalid_parameter_maps_to_bad_request_envelope() {
    let response = app(Arc::new(OpenGate))
        .oneshot(Request::get("/search?page=0").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_parameter");
    assert!(body["requestId"].as_str().unwrap().starts_with("req_rm_"));
}

#[tokio::test]
async fn facets_route_serves_counts() {
    let response = app(Arc::new(OpenGate))
        .oneshot(
            Request::get("/search/facets?category=shoes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["brands"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["priceRange"]["min"], 90.0);
    assert_eq!(body["data"]["priceRange"]["max"], 150.0);
}

#[tokio::test]
async fn backfill_requires_the_admin_token() {
    let app = app(Arc::new(TokenAdminGate::new("s3cret")));

    let denied = app
        .clone()
        .oneshot(Request::post("/admin/backfill").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    let body = body_json(denied).await;
    assert_eq!(body["error"], "unauthorized");

    let granted = app
        .oneshot(
            Request::post("/admin/backfill")
                .header("authorization", "Bearer s3cret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(granted.status(), StatusCode::OK);
    let body = body_json(granted).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["updated"], 1);
    assert_eq!(body["data"]["preview"][0]["productId"], "p1");
}

#[tokio::test]
async fn migrate_accepts_the_admin_key_header() {
    let app = app(Arc::new(TokenAdminGate::new("s3cret")));

    let response = app
        .oneshot(
            Request::post("/admin/migrate")
                .header("x-admin-key", "s3cret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["matched"], 2);
    assert_eq!(body["data"]["modified"], 2);
}

#[tokio::test]
async fn open_gate_admits_unauthenticated_admin_calls() {
    let response = app(Arc::new(OpenGate))
        .oneshot(Request::post("/admin/migrate").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
