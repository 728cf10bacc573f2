use axum::{body::Bytes, extract::State};

use crate::app::AppState;
use crate::catalog::CategoryView;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, MessageResponse};
use crate::services::CreateCategoryRequest;

/// GET /categories
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<CategoryView>> {
    let categories = state.categories.list().await.map_err(|e| {
        // Logged only; the client always gets the fixed message
        tracing::error!("Failed to fetch categories: {}", e);
        ApiError::internal_server_error("failed to fetch categories")
    })?;

    Ok(ApiResponse::success(categories))
}

/// POST /categories - body `{"code": "...", "name": "..."}`
///
/// The body is decoded by hand so malformed JSON maps to our own 400 message
/// instead of axum's `Json` rejection.
pub async fn create(State(state): State<AppState>, body: Bytes) -> ApiResult<MessageResponse> {
    let category = CreateCategoryRequest::from_json(&body)?.validate()?;

    state.categories.create(category).await.map_err(|e| {
        tracing::error!("Failed to create category: {}", e);
        ApiError::internal_server_error("Failed to create category")
    })?;

    Ok(ApiResponse::created(MessageResponse {
        message: "Category created successfully",
    }))
}
