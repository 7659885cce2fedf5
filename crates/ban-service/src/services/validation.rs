//! Validation gate for ban records
//!
//! Runs on the write path only. Enforcement lookups never reach the identity
//! service.

use tracing::{instrument, warn};

use ban_core::traits::IdentityService;
use ban_core::{BanKey, BanRecord, DomainError, MAX_IP_LENGTH};

use super::error::ServiceResult;

/// Rejects records that must not be trusted for enforcement
pub struct ValidationGate<'a> {
    identity: &'a dyn IdentityService,
}

impl<'a> ValidationGate<'a> {
    pub fn new(identity: &'a dyn IdentityService) -> Self {
        Self { identity }
    }

    /// Check a record before it is persisted.
    ///
    /// User-anchored records need the user to exist, unless `stored` is the
    /// current row and already names the same user. IP-only records pass.
    /// Records with neither key are orphaned.
    #[instrument(skip(self, record, stored), fields(ban_id = %record.id))]
    pub async fn check(&self, record: &BanRecord, stored: Option<&BanRecord>) -> ServiceResult<()> {
        if let Some(ip) = record.ip.as_deref() {
            if ip.len() > MAX_IP_LENGTH {
                warn!(len = ip.len(), "Rejected ban with oversized IP");
                return Err(DomainError::ValidationError(format!(
                    "IP address longer than {MAX_IP_LENGTH} characters"
                ))
                .into());
            }
        }

        match record.key() {
            Some(BanKey::User(user_id)) => {
                if stored.is_some_and(|s| s.user_id == record.user_id) {
                    return Ok(());
                }
                if self.identity.user_exists(user_id).await? {
                    Ok(())
                } else {
                    warn!(user_id = %user_id, "Rejected ban for unknown user");
                    Err(DomainError::InvalidIdentity(user_id).into())
                }
            }
            Some(BanKey::Ip(_)) => Ok(()),
            None => {
                warn!("Rejected ban with neither user nor IP");
                Err(DomainError::OrphanedBan.into())
            }
        }
    }
}
