mod common;

use anyhow::Result;
use axum::http::StatusCode;
use catalog_api::database::memory::StoreCalls;
use serde_json::json;

// GET /catalog/:code - detail mapping and error separation

#[tokio::test]
async fn variants_inherit_missing_or_zero_prices() -> Result<()> {
    let app = common::test_app(common::sample_store());

    let (status, body) = common::get(&app, "/catalog/PROD001").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "code": "PROD001",
            "price": 19.99,
            "category": { "code": "shoes", "name": "Shoes" },
            "variants": [
                { "name": "Red Small", "sku": "SKU001-A", "price": 19.99 },
                { "name": "Red Medium", "sku": "SKU001-B", "price": 17.75 },
                { "name": "Red Large", "sku": "SKU001-C", "price": 19.99 }
            ]
        })
    );
    Ok(())
}

#[tokio::test]
async fn product_without_variants_has_empty_list() -> Result<()> {
    let app = common::test_app(common::sample_store());

    let (status, body) = common::get(&app, "/catalog/PROD004").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 95.5);
    assert_eq!(body["category"], json!({ "code": "clothing", "name": "Clothing" }));
    assert_eq!(body["variants"], json!([]));
    Ok(())
}

#[tokio::test]
async fn unknown_code_is_not_found() -> Result<()> {
    let store = common::sample_store();
    let app = common::test_app(store.clone());

    let (status, body) = common::get(&app, "/catalog/PROD999").await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Product not found" }));
    assert_eq!(StoreCalls::count(&store.calls.product_by_code), 1);
    assert_eq!(StoreCalls::count(&store.calls.filtered_products), 0);
    Ok(())
}

#[tokio::test]
async fn store_failure_is_not_reported_as_not_found() -> Result<()> {
    let store = common::sample_store();
    store.set_failing(true);
    let app = common::test_app(store);

    let (status, body) = common::get(&app, "/catalog/PROD001").await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to retrieve product" }));
    Ok(())
}
