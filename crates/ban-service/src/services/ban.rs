//! Ban service
//!
//! Moderation actions on ban records (create, update, lift, extend) and the
//! enforcement checks exposed to request handlers and event adapters.
//! Records are never deleted here; lifting is a state change.

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use ban_core::{BanDecision, BanId, BanRecord, DomainError, Metadata, UserId};

use crate::dto::{BanResponse, CreateBanRequest, LiftBanRequest, UpdateBanRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::resolver::BanResolver;
use super::store::BanStore;

/// Ban service
pub struct BanService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BanService<'a> {
    /// Create a new BanService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn store(&self) -> BanStore<'a> {
        BanStore::new(self.ctx)
    }

    fn now(&self) -> DateTime<Utc> {
        self.ctx.clock().now()
    }

    // ------------------------------------------------------------------------
    // Enforcement
    // ------------------------------------------------------------------------

    pub async fn check_user(&self, user_id: UserId) -> ServiceResult<BanDecision> {
        BanResolver::new(self.ctx).check_user(user_id).await
    }

    pub async fn check_ip(&self, ip: &str) -> ServiceResult<BanDecision> {
        BanResolver::new(self.ctx).check_ip(ip).await
    }

    /// User-level bans take priority over IP-level ones
    pub async fn check_combined(
        &self,
        user_id: Option<UserId>,
        ip: Option<&str>,
    ) -> ServiceResult<BanDecision> {
        BanResolver::new(self.ctx).check_combined(user_id, ip).await
    }

    // ------------------------------------------------------------------------
    // Moderation
    // ------------------------------------------------------------------------

    /// Create a ban on behalf of `actor`
    #[instrument(skip(self, request))]
    pub async fn create(&self, actor: UserId, request: CreateBanRequest) -> ServiceResult<BanId> {
        request.validate()?;

        let mut record = BanRecord::with_keys(request.user_id, request.ip);
        record.blocked = request.blocked;
        record.expiration = request.expiration;
        record.created_by = Some(actor);
        record.created_time = Some(self.now());
        record.reason_private = request.reason_private;
        record.reason_public = request.reason_public;
        record.comments = request.comments;
        record.params = request.params;

        let ban_id = self.store().save(record).await?;
        info!(ban_id = %ban_id, actor = %actor, "Ban created");
        Ok(ban_id)
    }

    /// Persist a record as given: a zero id inserts, anything else updates.
    ///
    /// Audit fields are taken from the record. Prefer [`Self::create`] and
    /// [`Self::update`] for moderator actions.
    #[instrument(skip(self, record), fields(ban_id = %record.id))]
    pub async fn save(&self, record: BanRecord) -> ServiceResult<BanId> {
        let ban_id = self.store().save(record).await?;
        info!(ban_id = %ban_id, "Ban saved");
        Ok(ban_id)
    }

    /// Apply the fields present in `request`
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        ban_id: BanId,
        actor: UserId,
        request: UpdateBanRequest,
    ) -> ServiceResult<BanResponse> {
        request.validate()?;
        let mut record = self.load(ban_id).await?;

        if let Some(blocked) = request.blocked {
            record.blocked = blocked;
        }
        if let Some(expiration) = request.expiration {
            record.expiration = expiration;
        }
        if let Some(reason) = request.reason_private {
            record.reason_private = reason;
        }
        if let Some(reason) = request.reason_public {
            record.reason_public = reason;
        }
        if let Some(comments) = request.comments {
            record.comments = Some(comments);
        }
        if let Some(params) = request.params {
            record.params = Some(params);
        }

        let record = self.persist(record, actor).await?;
        info!(ban_id = %ban_id, actor = %actor, "Ban updated");
        self.respond(&record)
    }

    /// End a ban now without deleting it.
    ///
    /// The expiration becomes the current instant and `blocked` is cleared. A
    /// comment, if given, is appended to the record's comment log.
    #[instrument(skip(self, request))]
    pub async fn lift(
        &self,
        ban_id: BanId,
        actor: UserId,
        request: LiftBanRequest,
    ) -> ServiceResult<BanResponse> {
        request.validate()?;
        let mut record = self.load(ban_id).await?;
        let now = self.now();

        record.expiration = Some(now);
        record.blocked = false;
        if let Some(comment) = request.comment {
            record.comments = Some(comment_entry(&record, actor, now, comment)?);
        }

        let record = self.persist(record, actor).await?;
        info!(ban_id = %ban_id, actor = %actor, "Ban lifted");
        self.respond(&record)
    }

    /// Move the expiration; `None` makes the ban permanent
    #[instrument(skip(self))]
    pub async fn extend(
        &self,
        ban_id: BanId,
        actor: UserId,
        expiration: Option<DateTime<Utc>>,
    ) -> ServiceResult<BanResponse> {
        let mut record = self.load(ban_id).await?;
        record.expiration = expiration;

        let record = self.persist(record, actor).await?;
        info!(ban_id = %ban_id, actor = %actor, expiration = ?expiration, "Ban expiration changed");
        self.respond(&record)
    }

    // ------------------------------------------------------------------------
    // Audit
    // ------------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn get_ban(&self, ban_id: BanId) -> ServiceResult<BanResponse> {
        let record = self.load(ban_id).await?;
        self.respond(&record)
    }

    /// Every ban recorded for a user, newest first
    #[instrument(skip(self))]
    pub async fn user_history(&self, user_id: UserId) -> ServiceResult<Vec<BanResponse>> {
        let records = self.store().user_history(user_id).await?;
        records.iter().map(|r| self.respond(r)).collect()
    }

    /// Every ban recorded for an IP address, newest first
    #[instrument(skip(self))]
    pub async fn ip_history(&self, ip: &str) -> ServiceResult<Vec<BanResponse>> {
        let records = self.store().ip_history(ip).await?;
        records.iter().map(|r| self.respond(r)).collect()
    }

    async fn load(&self, ban_id: BanId) -> ServiceResult<BanRecord> {
        self.store()
            .find_by_id(ban_id)
            .await?
            .ok_or_else(|| DomainError::BanNotFound(ban_id).into())
    }

    /// Stamp the modification audit, save, and return the stored form
    async fn persist(&self, mut record: BanRecord, actor: UserId) -> ServiceResult<BanRecord> {
        record.touch(actor, self.now());
        let ban_id = self.store().save(record).await?;
        self.load(ban_id).await
    }

    fn respond(&self, record: &BanRecord) -> ServiceResult<BanResponse> {
        Ok(BanResponse::from_record(record, self.now())?)
    }
}

fn comment_entry(
    record: &BanRecord,
    actor: UserId,
    now: DateTime<Utc>,
    comment: String,
) -> Result<Metadata, DomainError> {
    let entry = json!({
        "user_id": actor,
        "time": now.to_rfc3339(),
        "comment": comment,
    });
    Metadata::append(record.comments.as_ref(), "comments", entry)
}
