//! Wiring of the PostgreSQL adapters into a [`ServiceContext`]

use std::sync::Arc;

use ban_common::{try_init_tracing_with_config, AppConfig, AppError, AppResult};
use ban_core::SystemClock;
use ban_db::{create_pool, run_migrations, PgBanRepository, PgIdentityRepository};
use tracing::{info, warn};

use crate::services::{ServiceContext, ServiceContextBuilder};

/// Connect to PostgreSQL and build the service context
pub async fn create_service_context(config: &AppConfig) -> AppResult<ServiceContext> {
    info!("Connecting to PostgreSQL...");
    let db_config = ban_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let ban_repo = Arc::new(PgBanRepository::new(pool.clone()));
    let identity = Arc::new(PgIdentityRepository::new(pool));

    let context = ServiceContextBuilder::new()
        .ban_repo(ban_repo)
        .identity(identity)
        .clock(Arc::new(SystemClock))
        .build()?;
    Ok(context)
}

/// Load configuration from the environment, install tracing and build the context
pub async fn init_from_env() -> AppResult<ServiceContext> {
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(config.tracing_config()) {
        warn!(error = %e, "Tracing already initialized");
    }

    info!(env = ?config.app.env, name = %config.app.name, "Configuration loaded");
    create_service_context(&config).await
}
