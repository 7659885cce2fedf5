//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::BanRecord;
use crate::error::DomainError;
use crate::value_objects::{BanId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Which records a keyed lookup may return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// Any record, expired or not (audit lookups)
    Any,
    /// Only records with no expiration or one strictly after the instant
    ActiveAt(DateTime<Utc>),
}

impl LookupMode {
    /// Does `record` qualify under this mode
    pub fn admits(&self, record: &BanRecord) -> bool {
        match self {
            Self::Any => true,
            Self::ActiveAt(now) => record.is_active_at(*now),
        }
    }
}

// ============================================================================
// Ban Repository
// ============================================================================

#[async_trait]
pub trait BanRepository: Send + Sync {
    /// Find ban by ID
    async fn find_by_id(&self, id: BanId) -> RepoResult<Option<BanRecord>>;

    /// Most recent (highest id) ban for a user that qualifies under `mode`
    async fn find_latest_by_user(
        &self,
        user_id: UserId,
        mode: LookupMode,
    ) -> RepoResult<Option<BanRecord>>;

    /// Most recent (highest id) ban for an IP address that qualifies under `mode`
    async fn find_latest_by_ip(&self, ip: &str, mode: LookupMode) -> RepoResult<Option<BanRecord>>;

    /// Every ban for a user, newest first
    async fn find_all_by_user(&self, user_id: UserId) -> RepoResult<Vec<BanRecord>>;

    /// Every ban for an IP address, newest first
    async fn find_all_by_ip(&self, ip: &str) -> RepoResult<Vec<BanRecord>>;

    /// Insert a new ban (zero id) or overwrite the row with the record's id.
    ///
    /// Metadata must already be encoded. The write is all-or-nothing.
    async fn save(&self, record: &BanRecord) -> RepoResult<BanId>;
}
