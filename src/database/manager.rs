use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseConfig, PostgresParts};

/// Sample catalog loaded by `catalog seed`; safe to run repeatedly
const SEED_SQL: &str = include_str!("../../seeds/catalog.sql");

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connection, migration and seeding for the catalog database
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool sized and timed according to `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = Self::build_connection_string(config)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&connection_string)
            .await?;

        info!("Created database pool ({} max connections)", config.max_connections);
        Ok(pool)
    }

    /// DATABASE_URL when configured, otherwise assembled from the POSTGRES_* parts
    fn build_connection_string(config: &DatabaseConfig) -> Result<String, DatabaseError> {
        if let Some(url) = &config.url {
            url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
            return Ok(url.clone());
        }
        Self::url_from_parts(&config.postgres)
    }

    fn url_from_parts(parts: &PostgresParts) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(&format!("postgres://{}", parts.host))
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_username(&parts.user)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if !parts.password.is_empty() {
            url.set_password(Some(&parts.password))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        url.set_port(Some(parts.port))
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_path(&format!("/{}", parts.database));
        Ok(url.into())
    }

    /// Apply the embedded migrations
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Load the sample catalog
    pub async fn seed(pool: &PgPool) -> Result<(), DatabaseError> {
        pool.execute(SEED_SQL).await?;
        info!("Sample catalog loaded");
        Ok(())
    }
}
