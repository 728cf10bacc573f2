use std::sync::Arc;

use anyhow::Context;
use catalog_api::{
    app,
    config::config,
    database::{DatabaseManager, PgCatalogStore},
    AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, POSTGRES_*, etc.
    let _ = dotenvy::dotenv();
    catalog_api::init_tracing();

    let config = config();
    info!("Starting catalog API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database).await?;
    if config.database.run_migrations {
        DatabaseManager::migrate(&pool).await?;
    }

    let state = AppState::new(Arc::new(PgCatalogStore::new(pool.clone())));
    let router = app(state, &config.api);

    let bind_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Catalog API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Catalog API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
