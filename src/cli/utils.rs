use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;

use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::{CatalogStore, DatabaseManager, PgCatalogStore};

/// Connect using the environment configuration
pub async fn open_pool() -> anyhow::Result<PgPool> {
    DatabaseManager::connect(&config().database)
        .await
        .context("failed to connect to the catalog database")
}

pub async fn open_store() -> anyhow::Result<Arc<dyn CatalogStore>> {
    Ok(Arc::new(PgCatalogStore::new(open_pool().await?)))
}

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "message": message
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Pretty-print any serializable value as JSON
pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ collection_name: [] }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}
