use crate::cli::utils::{open_pool, output_success};
use crate::cli::OutputFormat;
use crate::database::DatabaseManager;

pub async fn migrate(output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = open_pool().await?;
    DatabaseManager::migrate(&pool).await?;
    pool.close().await;
    output_success(output_format, "Migrations applied")
}

/// Migrations run first so seeding works against an empty database
pub async fn seed(output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = open_pool().await?;
    DatabaseManager::migrate(&pool).await?;
    DatabaseManager::seed(&pool).await?;
    pool.close().await;
    output_success(output_format, "Sample catalog loaded")
}
