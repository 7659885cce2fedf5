//! # ban-db
//!
//! Storage layer implementing the ban-core ports.
//!
//! ## Overview
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - PostgreSQL repositories (`PgBanRepository`, `PgIdentityRepository`)
//! - In-memory adapters (`MemoryBanRepository`, `MemoryIdentityService`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ban_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use ban_db::repositories::PgBanRepository;
//! use ban_core::{BanRepository, LookupMode, UserId};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let bans = PgBanRepository::new(pool);
//!
//!     let latest = bans.find_latest_by_user(UserId::new(7), LookupMode::Any).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryBanRepository, MemoryIdentityService};
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgBanRepository, PgIdentityRepository};
