pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

pub use app::{app, AppState};

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber; RUST_LOG overrides the default filter
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("catalog_api=info,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
