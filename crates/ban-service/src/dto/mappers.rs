//! Entity to DTO mappers
//!
//! Implements conversions from domain entities to response DTOs.

use chrono::{DateTime, Utc};

use ban_core::{BanDecision, BanRecord, DomainError};

use super::responses::{BanCheckResponse, BanResponse, PublicBanResponse};

impl BanResponse {
    /// Build the staff view, decoding metadata and evaluating activity at `now`
    pub fn from_record(record: &BanRecord, now: DateTime<Utc>) -> Result<Self, DomainError> {
        Ok(Self {
            id: record.id,
            user_id: record.user_id,
            ip: record.ip.clone(),
            blocked: record.blocked,
            expiration: record.expiration,
            active: record.is_active_at(now),
            created_by: record.created_by,
            created_time: record.created_time,
            modified_by: record.modified_by,
            modified_time: record.modified_time,
            reason_private: record.reason_private.clone(),
            reason_public: record.reason_public.clone(),
            comments: record.decoded_comments()?,
            params: record.decoded_params()?,
        })
    }
}

impl From<&BanRecord> for PublicBanResponse {
    fn from(record: &BanRecord) -> Self {
        Self {
            expiration: record.expiration,
            reason_public: record.reason_public.clone(),
        }
    }
}

impl From<&BanDecision> for BanCheckResponse {
    fn from(decision: &BanDecision) -> Self {
        Self {
            banned: decision.is_banned(),
            ban: decision.record().map(PublicBanResponse::from),
        }
    }
}

impl From<BanDecision> for BanCheckResponse {
    fn from(decision: BanDecision) -> Self {
        Self::from(&decision)
    }
}
