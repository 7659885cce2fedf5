//! PostgreSQL connection pool management

use std::path::Path;
use std::time::Duration;

use ban_common::{AppConfig, ConfigError};
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// Directory holding the SQL migrations shipped with this crate
const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations");

/// Database configuration for connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Maximum time to wait for a connection; bounds every storage call
    pub acquire_timeout: Duration,
    /// Maximum idle time before a connection is closed
    pub idle_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from(&ban_common::DatabaseConfig::default())
    }
}

impl DatabaseConfig {
    /// Create config from environment variables.
    ///
    /// Reads the same variables and defaults as [`ban_common::AppConfig`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = AppConfig::from_env()?;
        Ok(Self::from(&config.database))
    }
}

impl From<&ban_common::DatabaseConfig> for DatabaseConfig {
    fn from(config: &ban_common::DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            acquire_timeout: Duration::from_secs(config.acquire_timeout_secs),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Create a new PostgreSQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect(&config.url)
        .await
}

/// Create a connection pool from the DATABASE_URL environment variable
pub async fn create_pool_from_env() -> Result<PgPool, sqlx::Error> {
    let config = DatabaseConfig::from_env().map_err(|e| sqlx::Error::Configuration(e.into()))?;
    create_pool(&config).await
}

/// Apply pending migrations from this crate's `migrations/` directory
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    let migrator = Migrator::new(Path::new(MIGRATIONS_DIR)).await?;
    migrator.run(pool).await?;
    info!(count = migrator.iter().count(), "Migrations applied");
    Ok(())
}
