//! Ban resolver - turns identity hints into one effective decision
//!
//! A user-anchored ban in force always takes priority over an IP-anchored one.
//! Nothing is cached between calls; every check reads the clock again.

use tracing::{debug, instrument};

use ban_core::{BanDecision, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::store::BanStore;

pub struct BanResolver<'a> {
    store: BanStore<'a>,
}

impl<'a> BanResolver<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            store: BanStore::new(ctx),
        }
    }

    /// Is the user currently banned
    #[instrument(skip(self))]
    pub async fn check_user(&self, user_id: UserId) -> ServiceResult<BanDecision> {
        self.check_combined(Some(user_id), None).await
    }

    /// Is the IP address currently banned
    #[instrument(skip(self))]
    pub async fn check_ip(&self, ip: &str) -> ServiceResult<BanDecision> {
        self.check_combined(None, Some(ip)).await
    }

    /// Check the user first, then fall back to the IP address
    #[instrument(skip(self))]
    pub async fn check_combined(
        &self,
        user_id: Option<UserId>,
        ip: Option<&str>,
    ) -> ServiceResult<BanDecision> {
        if let Some(user_id) = user_id.filter(UserId::is_valid) {
            if let Some(record) = self.store.find_active_by_user(user_id).await?.into_found() {
                debug!(user_id = %user_id, ban_id = %record.id, "User-level ban in force");
                return Ok(BanDecision::Banned(record));
            }
        }

        if let Some(ip) = ip.filter(|ip| !ip.is_empty()) {
            if let Some(record) = self.store.find_active_by_ip(ip).await?.into_found() {
                debug!(ip = %ip, ban_id = %record.id, "IP-level ban in force");
                return Ok(BanDecision::Banned(record));
            }
        }

        Ok(BanDecision::NotBanned)
    }
}
