//! Test helpers for integration tests
//!
//! [`MemoryHarness`] runs the service on the in-memory adapters with a manual
//! clock. [`PgHarness`] runs it on PostgreSQL and is only available when
//! `DATABASE_URL` is set.

use std::sync::Arc;

use anyhow::Result;
use ban_common::{AppConfig, AppSettings, DatabaseConfig, Environment, LogConfig};
use ban_core::{FixedClock, UserId};
use ban_db::{MemoryBanRepository, MemoryIdentityService, PgPool};
use ban_service::{create_service_context, BanService, ServiceContext};

use crate::fixtures::{epoch, MODERATOR};

/// Service wired to in-memory storage and identity
pub struct MemoryHarness {
    pub repo: Arc<MemoryBanRepository>,
    pub identity: Arc<MemoryIdentityService>,
    pub clock: Arc<FixedClock>,
    pub ctx: ServiceContext,
}

impl MemoryHarness {
    /// Harness where only the moderator and `users` exist
    pub fn with_users(users: &[i64]) -> Self {
        let repo = Arc::new(MemoryBanRepository::new());
        let identity = Arc::new(MemoryIdentityService::with_users(
            users.iter().copied().map(UserId::new).chain([MODERATOR]),
        ));
        let clock = Arc::new(FixedClock::new(epoch()));
        let ctx = ServiceContext::new(repo.clone(), identity.clone(), clock.clone());
        Self {
            repo,
            identity,
            clock,
            ctx,
        }
    }

    pub fn service(&self) -> BanService<'_> {
        BanService::new(&self.ctx)
    }
}

/// Service wired to PostgreSQL
pub struct PgHarness {
    pub pool: PgPool,
    pub ctx: ServiceContext,
}

impl PgHarness {
    /// Connect using `DATABASE_URL`, or `None` when it is not set
    pub async fn connect() -> Option<Self> {
        dotenvy::dotenv().ok();
        let url = std::env::var("DATABASE_URL").ok()?;
        match Self::connect_to(url).await {
            Ok(harness) => Some(harness),
            Err(e) => {
                eprintln!("Skipping test: database not reachable: {e}");
                None
            }
        }
    }

    async fn connect_to(url: String) -> Result<Self> {
        let config = test_config(url);
        let ctx = create_service_context(&config).await?;
        let pool = PgPool::connect(&config.database.url).await?;
        sqlx::query("CREATE TABLE IF NOT EXISTS users (id BIGINT PRIMARY KEY)")
            .execute(&pool)
            .await?;
        Ok(Self { pool, ctx })
    }

    pub fn service(&self) -> BanService<'_> {
        BanService::new(&self.ctx)
    }

    /// Register a user with the identity table
    pub async fn add_user(&self, user_id: UserId) -> Result<()> {
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Configuration for tests against the given database
pub fn test_config(url: String) -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "ban-server-test".to_string(),
            env: Environment::Development,
        },
        database: DatabaseConfig {
            url,
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            run_migrations: true,
        },
        log: LogConfig { json: Some(false) },
    }
}
