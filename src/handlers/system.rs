use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - service index
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Catalog API",
        "version": version,
        "endpoints": {
            "catalog": "/catalog?offset&limit&category&price_lt",
            "product": "/catalog/:code",
            "categories": "/categories (GET, POST)",
            "health": "/health",
        }
    }))
}

/// GET /health - store connectivity check
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "error": "database unavailable"
                })),
            )
        }
    }
}
