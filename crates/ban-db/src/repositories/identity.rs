//! PostgreSQL implementation of IdentityService

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ban_core::traits::{IdentityService, RepoResult};
use ban_core::value_objects::UserId;

use super::error::map_db_error;

/// Existence checks against the host application's `users` table
#[derive(Clone)]
pub struct PgIdentityRepository {
    pool: PgPool,
}

impl PgIdentityRepository {
    /// Create a new PgIdentityRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityService for PgIdentityRepository {
    #[instrument(skip(self))]
    async fn user_exists(&self, user_id: UserId) -> RepoResult<bool> {
        if !user_id.is_valid() {
            return Ok(false);
        }

        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }
}
