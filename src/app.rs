use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;
use crate::database::CatalogStore;
use crate::handlers;
use crate::services::{CatalogService, CategoryService};

/// Shared per-process state; every request goes straight to the store
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub catalog: CatalogService,
    pub categories: CategoryService,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog: CatalogService::new(store.clone()),
            categories: CategoryService::new(store.clone()),
            store,
        }
    }
}

/// Full router with the configured middleware stack
pub fn app(state: AppState, config: &ApiConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .merge(catalog_routes())
        .merge(category_routes())
        .layer(DefaultBodyLimit::max(config.max_request_size_bytes))
        .with_state(state);

    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn catalog_routes() -> Router<AppState> {
    use handlers::catalog;

    Router::new()
        .route("/catalog", get(catalog::list))
        .route("/catalog/:code", get(catalog::show))
}

fn category_routes() -> Router<AppState> {
    use handlers::categories;

    Router::new().route("/categories", get(categories::list).post(categories::create))
}
