use axum::extract::{Path, RawQuery, State};

use crate::app::AppState;
use crate::catalog::{CatalogQuery, ProductDetail, ProductListResponse};
use crate::database::StoreError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /catalog?offset&limit&category&price_lt - filtered, paginated listing
///
/// Malformed parameters fall back to defaults; only store failures error.
pub async fn list(State(state): State<AppState>, RawQuery(raw): RawQuery) -> ApiResult<ProductListResponse> {
    let query = CatalogQuery::from_query_string(raw.as_deref());

    let response = state.catalog.list_products(&query).await.map_err(|e| {
        tracing::error!("Failed to list products: {}", e);
        ApiError::internal_server_error("failed to get products")
    })?;

    Ok(ApiResponse::success(response))
}

/// GET /catalog/:code - product detail with inherited variant prices
pub async fn show(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult<ProductDetail> {
    match state.catalog.product_detail(&code).await {
        Ok(detail) => Ok(ApiResponse::success(detail)),
        Err(StoreError::NotFound(_)) => Err(ApiError::not_found("Product not found")),
        Err(e) => {
            tracing::error!("Failed to retrieve product {}: {}", code, e);
            Err(ApiError::internal_server_error("Failed to retrieve product"))
        }
    }
}
