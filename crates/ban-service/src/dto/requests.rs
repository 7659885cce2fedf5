//! Request DTOs for ban moderation actions
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use ban_core::{Metadata, UserId};

fn default_blocked() -> bool {
    true
}

/// Create ban request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBanRequest {
    /// Zero or absent for an IP-only ban
    #[serde(default)]
    pub user_id: Option<UserId>,

    #[validate(ip(message = "Invalid IP address"))]
    #[serde(default)]
    pub ip: Option<String>,

    #[serde(default = "default_blocked")]
    pub blocked: bool,

    /// Absent for a permanent ban
    #[serde(default)]
    pub expiration: Option<DateTime<Utc>>,

    #[validate(length(max = 2000, message = "Private reason must be at most 2000 characters"))]
    #[serde(default)]
    pub reason_private: String,

    #[validate(length(max = 2000, message = "Public reason must be at most 2000 characters"))]
    #[serde(default)]
    pub reason_public: String,

    #[serde(default)]
    pub comments: Option<Metadata>,

    #[serde(default)]
    pub params: Option<Metadata>,
}

impl CreateBanRequest {
    /// Permanent ban on a user account
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::empty()
        }
    }

    /// Permanent ban on an IP address
    pub fn for_ip(ip: impl Into<String>) -> Self {
        Self {
            ip: Some(ip.into()),
            ..Self::empty()
        }
    }

    fn empty() -> Self {
        Self {
            user_id: None,
            ip: None,
            blocked: true,
            expiration: None,
            reason_private: String::new(),
            reason_public: String::new(),
            comments: None,
            params: None,
        }
    }
}

/// Update ban request; absent fields are left unchanged.
///
/// The user and IP keys of a ban cannot be changed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBanRequest {
    pub blocked: Option<bool>,

    /// `Some(None)` makes the ban permanent
    #[serde(default, with = "double_option")]
    pub expiration: Option<Option<DateTime<Utc>>>,

    #[validate(length(max = 2000, message = "Private reason must be at most 2000 characters"))]
    pub reason_private: Option<String>,

    #[validate(length(max = 2000, message = "Public reason must be at most 2000 characters"))]
    pub reason_public: Option<String>,

    pub comments: Option<Metadata>,

    pub params: Option<Metadata>,
}

/// Lift ban request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LiftBanRequest {
    /// Appended to the ban's comment log
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub comment: Option<String>,
}

/// Distinguishes an absent field from an explicit `null`
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
