//! Ban record store
//!
//! Keyed lookups and the validated write path on top of [`BanRepository`].
//! A miss is not an error: lookups return [`BanLookup::NotFound`] carrying the
//! queried key.

use tracing::{debug, instrument};

use ban_core::traits::{BanRepository, LookupMode};
use ban_core::{BanId, BanKey, BanLookup, BanRecord, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::validation::ValidationGate;

/// Store facade over the ban repository
pub struct BanStore<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BanStore<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn repo(&self) -> &dyn BanRepository {
        self.ctx.ban_repo()
    }

    /// Normalize metadata, validate and persist a record.
    ///
    /// Nothing is written when any step fails. Updates that keep the stored
    /// user skip the identity check, so bans on deleted accounts stay editable.
    #[instrument(skip(self, record), fields(ban_id = %record.id))]
    pub async fn save(&self, record: BanRecord) -> ServiceResult<BanId> {
        let record = record.normalize_metadata()?;
        let stored = if record.is_new() {
            None
        } else {
            self.repo().find_by_id(record.id).await?
        };
        ValidationGate::new(self.ctx.identity())
            .check(&record, stored.as_ref())
            .await?;

        let id = self.repo().save(&record).await?;
        debug!(ban_id = %id, "Ban record saved");
        Ok(id)
    }

    /// Load a record by id
    pub async fn find_by_id(&self, ban_id: BanId) -> ServiceResult<Option<BanRecord>> {
        if !ban_id.is_valid() {
            return Ok(None);
        }
        Ok(self.repo().find_by_id(ban_id).await?)
    }

    /// Latest ban for the user that is still in force
    pub async fn find_active_by_user(&self, user_id: UserId) -> ServiceResult<BanLookup> {
        let now = self.ctx.clock().now();
        self.lookup_user(user_id, LookupMode::ActiveAt(now)).await
    }

    /// Latest ban for the user, expired or not
    pub async fn find_any_by_user(&self, user_id: UserId) -> ServiceResult<BanLookup> {
        self.lookup_user(user_id, LookupMode::Any).await
    }

    /// Latest ban for the IP address that is still in force
    pub async fn find_active_by_ip(&self, ip: &str) -> ServiceResult<BanLookup> {
        let now = self.ctx.clock().now();
        self.lookup_ip(ip, LookupMode::ActiveAt(now)).await
    }

    /// Latest ban for the IP address, expired or not
    pub async fn find_any_by_ip(&self, ip: &str) -> ServiceResult<BanLookup> {
        self.lookup_ip(ip, LookupMode::Any).await
    }

    /// Every ban recorded for the user, newest first
    pub async fn user_history(&self, user_id: UserId) -> ServiceResult<Vec<BanRecord>> {
        if !user_id.is_valid() {
            return Ok(Vec::new());
        }
        Ok(self.repo().find_all_by_user(user_id).await?)
    }

    /// Every ban recorded for the IP address, newest first
    pub async fn ip_history(&self, ip: &str) -> ServiceResult<Vec<BanRecord>> {
        if ip.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.repo().find_all_by_ip(ip).await?)
    }

    async fn lookup_user(&self, user_id: UserId, mode: LookupMode) -> ServiceResult<BanLookup> {
        let key = BanKey::User(user_id);
        if !user_id.is_valid() {
            return Ok(BanLookup::NotFound(key));
        }
        let found = self.repo().find_latest_by_user(user_id, mode).await?;
        Ok(found.map_or(BanLookup::NotFound(key), BanLookup::Found))
    }

    async fn lookup_ip(&self, ip: &str, mode: LookupMode) -> ServiceResult<BanLookup> {
        let key = BanKey::Ip(ip.to_string());
        if ip.is_empty() {
            return Ok(BanLookup::NotFound(key));
        }
        let found = self.repo().find_latest_by_ip(ip, mode).await?;
        Ok(found.map_or(BanLookup::NotFound(key), BanLookup::Found))
    }
}
