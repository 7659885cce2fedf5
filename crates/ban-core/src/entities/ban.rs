//! Ban entity - a time-bounded prohibition on a user account, an IP address, or both

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::value_objects::{BanId, Metadata, UserId};

/// Longest IP address text a record may carry
pub const MAX_IP_LENGTH: usize = 128;

/// Ban record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanRecord {
    /// Zero until the store assigns one
    pub id: BanId,
    /// `None` for IP-only bans
    pub user_id: Option<UserId>,
    /// `None` for user-only bans
    pub ip: Option<String>,
    pub blocked: bool,
    /// `None` means the ban never expires
    pub expiration: Option<DateTime<Utc>>,
    pub created_by: Option<UserId>,
    pub created_time: Option<DateTime<Utc>>,
    pub modified_by: Option<UserId>,
    pub modified_time: Option<DateTime<Utc>>,
    pub reason_private: String,
    pub reason_public: String,
    pub comments: Option<Metadata>,
    pub params: Option<Metadata>,
}

impl BanRecord {
    /// Unsaved record carrying the given key and nothing else
    pub fn unsaved(key: BanKey) -> Self {
        match key {
            BanKey::User(user_id) => Self::with_keys(Some(user_id), None),
            BanKey::Ip(ip) => Self::with_keys(None, Some(ip)),
        }
    }

    /// Unsaved record with either or both keys; zero users and empty IPs are dropped
    pub fn with_keys(user_id: Option<UserId>, ip: Option<String>) -> Self {
        Self {
            id: BanId::default(),
            user_id: user_id.filter(UserId::is_valid),
            ip: ip.filter(|ip| !ip.is_empty()),
            blocked: false,
            expiration: None,
            created_by: None,
            created_time: None,
            modified_by: None,
            modified_time: None,
            reason_private: String::new(),
            reason_public: String::new(),
            comments: None,
            params: None,
        }
    }

    /// Unsaved user-anchored record; a zero id leaves the user unset
    pub fn for_user(user_id: UserId) -> Self {
        Self::unsaved(BanKey::User(user_id))
    }

    /// Unsaved IP-anchored record
    pub fn for_ip(ip: impl Into<String>) -> Self {
        Self::unsaved(BanKey::Ip(ip.into()))
    }

    /// Has the store not assigned an id yet
    #[inline]
    pub fn is_new(&self) -> bool {
        self.id.is_zero()
    }

    #[inline]
    pub fn is_user_ban(&self) -> bool {
        self.user_id.is_some_and(|id| id.is_valid())
    }

    #[inline]
    pub fn is_ip_ban(&self) -> bool {
        self.ip.as_deref().is_some_and(|ip| !ip.is_empty())
    }

    /// Permanent until explicitly lifted
    #[inline]
    pub fn is_lifetime(&self) -> bool {
        self.expiration.is_none()
    }

    /// Active when there is no expiration or it is strictly after `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration.map_or(true, |expiration| expiration > now)
    }

    /// The key this record is enforced under; the user wins over the IP
    pub fn key(&self) -> Option<BanKey> {
        match (self.user_id.filter(UserId::is_valid), self.ip.as_deref()) {
            (Some(user_id), _) => Some(BanKey::User(user_id)),
            (None, Some(ip)) if !ip.is_empty() => Some(BanKey::Ip(ip.to_string())),
            _ => None,
        }
    }

    /// Record a mutation
    pub fn touch(&mut self, by: UserId, now: DateTime<Utc>) {
        self.modified_by = Some(by);
        self.modified_time = Some(now);
    }

    /// Run both metadata fields through the codec
    pub fn normalize_metadata(mut self) -> Result<Self, DomainError> {
        self.comments = self
            .comments
            .map(|m| m.normalize("comments"))
            .transpose()?;
        self.params = self.params.map(|m| m.normalize("params")).transpose()?;
        Ok(self)
    }

    pub fn decoded_comments(&self) -> Result<Option<Value>, DomainError> {
        self.comments.as_ref().map(|m| m.decode("comments")).transpose()
    }

    pub fn decoded_params(&self) -> Result<Option<Value>, DomainError> {
        self.params.as_ref().map(|m| m.decode("params")).transpose()
    }
}

/// Lookup key of a ban
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BanKey {
    User(UserId),
    Ip(String),
}

impl fmt::Display for BanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(user_id) => write!(f, "user:{user_id}"),
            Self::Ip(ip) => write!(f, "ip:{ip}"),
        }
    }
}

/// Result of a keyed lookup.
///
/// A miss still remembers which key was asked for, so callers can start a new
/// record for it via [`BanLookup::into_record`].
#[derive(Debug, Clone, PartialEq)]
pub enum BanLookup {
    Found(BanRecord),
    NotFound(BanKey),
}

impl BanLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn record(&self) -> Option<&BanRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound(_) => None,
        }
    }

    pub fn into_found(self) -> Option<BanRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound(_) => None,
        }
    }

    /// The found record, or an unsaved one carrying the queried key
    pub fn into_record(self) -> BanRecord {
        match self {
            Self::Found(record) => record,
            Self::NotFound(key) => BanRecord::unsaved(key),
        }
    }
}

/// Effective ban decision for an actor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "ban", rename_all = "snake_case")]
pub enum BanDecision {
    Banned(BanRecord),
    NotBanned,
}

impl BanDecision {
    pub fn is_banned(&self) -> bool {
        matches!(self, Self::Banned(_))
    }

    /// The record the decision cites
    pub fn record(&self) -> Option<&BanRecord> {
        match self {
            Self::Banned(record) => Some(record),
            Self::NotBanned => None,
        }
    }
}

impl From<BanLookup> for BanDecision {
    fn from(lookup: BanLookup) -> Self {
        match lookup {
            BanLookup::Found(record) => Self::Banned(record),
            BanLookup::NotFound(_) => Self::NotBanned,
        }
    }
}
