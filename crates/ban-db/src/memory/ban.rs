//! In-memory implementation of BanRepository
//!
//! Used by tests and by embedders that do not need durability. Every write
//! happens under one lock, so a save is either fully visible or not at all.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::instrument;

use ban_core::error::DomainError;
use ban_core::traits::{BanRepository, LookupMode, RepoResult};
use ban_core::value_objects::{BanId, UserId};
use ban_core::{BanRecord, MAX_IP_LENGTH};

use crate::mappers::BanWrite;

#[derive(Default)]
struct State {
    /// Keyed by id so iteration in reverse is newest first
    rows: BTreeMap<i64, BanRecord>,
    last_id: i64,
}

/// Ban table kept in process memory
#[derive(Default)]
pub struct MemoryBanRepository {
    state: RwLock<State>,
    unavailable: AtomicBool,
}

impl MemoryBanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with `StorageUnavailable` until switched back
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Release);
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.state.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::Acquire) {
            return Err(DomainError::StorageUnavailable(
                "in-memory store switched off".to_string(),
            ));
        }
        Ok(())
    }

    fn latest_where<F>(&self, mode: LookupMode, matches: F) -> RepoResult<Option<BanRecord>>
    where
        F: Fn(&BanRecord) -> bool,
    {
        self.check_available()?;
        let state = self.state.read();
        Ok(state
            .rows
            .values()
            .rev()
            .find(|record| matches(record) && mode.admits(record))
            .cloned())
    }

    fn all_where<F>(&self, matches: F) -> RepoResult<Vec<BanRecord>>
    where
        F: Fn(&BanRecord) -> bool,
    {
        self.check_available()?;
        let state = self.state.read();
        Ok(state
            .rows
            .values()
            .rev()
            .filter(|record| matches(record))
            .cloned()
            .collect())
    }
}

/// Row as the database would return it: encoded metadata, created audit kept
fn stored_form(record: &BanRecord) -> RepoResult<BanRecord> {
    let row = BanWrite::new(record)?;
    let mut stored = record.clone();
    stored.user_id = row.user_id.map(UserId::new);
    stored.ip = row.ip.map(str::to_string);
    stored.comments = row.comments.map(Into::into);
    stored.params = row.params.map(Into::into);
    Ok(stored)
}

#[async_trait]
impl BanRepository for MemoryBanRepository {
    async fn find_by_id(&self, id: BanId) -> RepoResult<Option<BanRecord>> {
        self.check_available()?;
        Ok(self.state.read().rows.get(&id.into_inner()).cloned())
    }

    async fn find_latest_by_user(
        &self,
        user_id: UserId,
        mode: LookupMode,
    ) -> RepoResult<Option<BanRecord>> {
        self.latest_where(mode, |record| record.user_id == Some(user_id))
    }

    async fn find_latest_by_ip(&self, ip: &str, mode: LookupMode) -> RepoResult<Option<BanRecord>> {
        self.latest_where(mode, |record| record.ip.as_deref() == Some(ip))
    }

    async fn find_all_by_user(&self, user_id: UserId) -> RepoResult<Vec<BanRecord>> {
        self.all_where(|record| record.user_id == Some(user_id))
    }

    async fn find_all_by_ip(&self, ip: &str) -> RepoResult<Vec<BanRecord>> {
        self.all_where(|record| record.ip.as_deref() == Some(ip))
    }

    #[instrument(skip(self, record), fields(ban_id = %record.id))]
    async fn save(&self, record: &BanRecord) -> RepoResult<BanId> {
        self.check_available()?;
        if record.key().is_none() {
            return Err(DomainError::ValidationError(
                "ban must reference a user or an IP address".to_string(),
            ));
        }
        if record.ip.as_ref().is_some_and(|ip| ip.len() > MAX_IP_LENGTH) {
            return Err(DomainError::ValidationError(format!(
                "ip longer than {MAX_IP_LENGTH} characters"
            )));
        }
        let mut stored = stored_form(record)?;

        let mut state = self.state.write();
        if record.is_new() {
            state.last_id += 1;
            stored.id = BanId::new(state.last_id);
        } else {
            let existing = state
                .rows
                .get(&record.id.into_inner())
                .ok_or(DomainError::BanNotFound(record.id))?;
            stored.created_by = existing.created_by;
            stored.created_time = existing.created_time;
        }

        let id = stored.id;
        state.rows.insert(id.into_inner(), stored);
        Ok(id)
    }
}
