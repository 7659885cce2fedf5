//! PostgreSQL implementation of BanRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use ban_core::traits::{BanRepository, LookupMode, RepoResult};
use ban_core::value_objects::{BanId, UserId};
use ban_core::BanRecord;

use crate::mappers::BanWrite;
use crate::models::BanModel;

use super::error::{ban_not_found, map_db_error};

const BAN_COLUMNS: &str = "id, user_id, ip, blocked, expiration, created_by, created_time, \
     modified_by, modified_time, reason_private, reason_public, comments, params";

/// PostgreSQL implementation of BanRepository
#[derive(Clone)]
pub struct PgBanRepository {
    pool: PgPool,
}

impl PgBanRepository {
    /// Create a new PgBanRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `None` disables the expiration filter
    fn active_cutoff(mode: LookupMode) -> Option<DateTime<Utc>> {
        match mode {
            LookupMode::Any => None,
            LookupMode::ActiveAt(now) => Some(now),
        }
    }

    async fn insert(&self, row: &BanWrite<'_>) -> RepoResult<BanId> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO users_banned (
                user_id, ip, blocked, expiration, created_by, created_time,
                modified_by, modified_time, reason_private, reason_public, comments, params
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            ",
        )
        .bind(row.user_id)
        .bind(row.ip)
        .bind(row.blocked)
        .bind(row.expiration)
        .bind(row.created_by)
        .bind(row.created_time)
        .bind(row.modified_by)
        .bind(row.modified_time)
        .bind(row.reason_private)
        .bind(row.reason_public)
        .bind(&row.comments)
        .bind(&row.params)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(BanId::new(id))
    }

    async fn update(&self, row: &BanWrite<'_>) -> RepoResult<BanId> {
        // created_by / created_time are write-once
        let id = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE users_banned
            SET user_id = $2,
                ip = $3,
                blocked = $4,
                expiration = $5,
                modified_by = $6,
                modified_time = $7,
                reason_private = $8,
                reason_public = $9,
                comments = $10,
                params = $11
            WHERE id = $1
            RETURNING id
            ",
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(row.ip)
        .bind(row.blocked)
        .bind(row.expiration)
        .bind(row.modified_by)
        .bind(row.modified_time)
        .bind(row.reason_private)
        .bind(row.reason_public)
        .bind(&row.comments)
        .bind(&row.params)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        id.map(BanId::new).ok_or_else(|| ban_not_found(BanId::new(row.id)))
    }
}

#[async_trait]
impl BanRepository for PgBanRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: BanId) -> RepoResult<Option<BanRecord>> {
        let result = sqlx::query_as::<_, BanModel>(&format!(
            "SELECT {BAN_COLUMNS} FROM users_banned WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(BanRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_latest_by_user(
        &self,
        user_id: UserId,
        mode: LookupMode,
    ) -> RepoResult<Option<BanRecord>> {
        let result = sqlx::query_as::<_, BanModel>(&format!(
            r"
            SELECT {BAN_COLUMNS}
            FROM users_banned
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR expiration IS NULL OR expiration > $2)
            ORDER BY id DESC
            LIMIT 1
            "
        ))
        .bind(user_id.into_inner())
        .bind(Self::active_cutoff(mode))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        debug!(found = result.is_some(), "User ban lookup");
        Ok(result.map(BanRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_latest_by_ip(&self, ip: &str, mode: LookupMode) -> RepoResult<Option<BanRecord>> {
        let result = sqlx::query_as::<_, BanModel>(&format!(
            r"
            SELECT {BAN_COLUMNS}
            FROM users_banned
            WHERE ip = $1
              AND ($2::timestamptz IS NULL OR expiration IS NULL OR expiration > $2)
            ORDER BY id DESC
            LIMIT 1
            "
        ))
        .bind(ip)
        .bind(Self::active_cutoff(mode))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        debug!(found = result.is_some(), "IP ban lookup");
        Ok(result.map(BanRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_all_by_user(&self, user_id: UserId) -> RepoResult<Vec<BanRecord>> {
        let results = sqlx::query_as::<_, BanModel>(&format!(
            "SELECT {BAN_COLUMNS} FROM users_banned WHERE user_id = $1 ORDER BY id DESC"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(BanRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_all_by_ip(&self, ip: &str) -> RepoResult<Vec<BanRecord>> {
        let results = sqlx::query_as::<_, BanModel>(&format!(
            "SELECT {BAN_COLUMNS} FROM users_banned WHERE ip = $1 ORDER BY id DESC"
        ))
        .bind(ip)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(BanRecord::from).collect())
    }

    #[instrument(skip(self, record), fields(ban_id = %record.id))]
    async fn save(&self, record: &BanRecord) -> RepoResult<BanId> {
        let row = BanWrite::new(record)?;

        if record.is_new() {
            self.insert(&row).await
        } else {
            self.update(&row).await
        }
    }
}
