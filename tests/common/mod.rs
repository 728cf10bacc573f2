#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use catalog_api::config::ApiConfig;
use catalog_api::database::models::{Category, Product, Variant};
use catalog_api::database::InMemoryCatalogStore;
use catalog_api::{app, AppState};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("valid decimal literal")
}

pub fn category(id: i64, code: &str, name: &str) -> Category {
    Category {
        id,
        code: code.to_string(),
        name: name.to_string(),
    }
}

pub fn product(id: i64, code: &str, category: Category, price: &str, variants: Vec<Variant>) -> Product {
    Product {
        id,
        code: code.to_string(),
        price: dec(price),
        category,
        variants,
    }
}

pub fn variant(id: i64, product_id: i64, name: &str, sku: &str, price: Option<&str>) -> Variant {
    Variant {
        id,
        product_id,
        name: name.to_string(),
        sku: sku.to_string(),
        price: price.map(dec),
    }
}

/// PROD001(shoes,19.99), PROD002(clothing,24.99), PROD003(accessories,10.00),
/// PROD004(clothing,95.50)
pub fn sample_products() -> Vec<Product> {
    let shoes = category(1, "shoes", "Shoes");
    let clothing = category(2, "clothing", "Clothing");
    let accessories = category(3, "accessories", "Accessories");

    vec![
        product(
            1,
            "PROD001",
            shoes,
            "19.99",
            vec![
                variant(1, 1, "Red Small", "SKU001-A", None),
                variant(2, 1, "Red Medium", "SKU001-B", Some("17.75")),
                variant(3, 1, "Red Large", "SKU001-C", Some("0")),
            ],
        ),
        product(2, "PROD002", clothing.clone(), "24.99", vec![]),
        product(3, "PROD003", accessories, "10.00", vec![]),
        product(4, "PROD004", clothing, "95.50", vec![]),
    ]
}

/// `count` products PROD001.. in a single category, priced 1.00, 2.00, ...
pub fn numbered_products(count: i64) -> Vec<Product> {
    let clothing = category(1, "clothing", "Clothing");
    (1..=count)
        .map(|i| {
            product(
                i,
                &format!("PROD{:03}", i),
                clothing.clone(),
                &format!("{}.00", i),
                vec![],
            )
        })
        .collect()
}

pub fn sample_store() -> Arc<InMemoryCatalogStore> {
    Arc::new(InMemoryCatalogStore::with_products(sample_products()))
}

pub fn test_app(store: Arc<InMemoryCatalogStore>) -> Router {
    app(AppState::new(store), &ApiConfig::default())
}

pub async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

pub async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder().uri(uri).body(Body::empty())?;
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;
    send(app, request).await
}

/// Product codes of a `GET /catalog` response body
pub fn codes(body: &Value) -> Vec<String> {
    body["products"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .filter_map(|p| p["code"].as_str().map(str::to_string))
        .collect()
}
