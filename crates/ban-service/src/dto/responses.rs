//! Response DTOs for ban queries
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Metadata is decoded for output; storage keeps the canonical text.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use ban_core::{BanId, UserId};

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Full ban record for staff
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BanResponse {
    pub id: BanId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub blocked: bool,
    pub expiration: Option<DateTime<Utc>>,
    /// In force at the time the response was built
    pub active: bool,
    pub created_by: Option<UserId>,
    pub created_time: Option<DateTime<Utc>>,
    pub modified_by: Option<UserId>,
    pub modified_time: Option<DateTime<Utc>>,
    pub reason_private: String,
    pub reason_public: String,
    pub comments: Option<Value>,
    pub params: Option<Value>,
}

/// What the banned actor is allowed to see
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicBanResponse {
    pub expiration: Option<DateTime<Utc>>,
    pub reason_public: String,
}

/// Outcome of a ban check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BanCheckResponse {
    pub banned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ban: Option<PublicBanResponse>,
}
