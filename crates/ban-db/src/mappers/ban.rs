//! Ban entity <-> model mapper

use ban_core::error::DomainError;
use ban_core::value_objects::{BanId, Metadata, UserId};
use ban_core::BanRecord;
use chrono::{DateTime, Utc};

use crate::models::BanModel;

/// Convert BanModel to BanRecord entity.
///
/// Metadata stays in its encoded text form.
impl From<BanModel> for BanRecord {
    fn from(model: BanModel) -> Self {
        BanRecord {
            id: BanId::new(model.id),
            user_id: model.user_id.map(UserId::new).filter(UserId::is_valid),
            ip: model.ip.filter(|ip| !ip.is_empty()),
            blocked: model.blocked,
            expiration: model.expiration,
            created_by: model.created_by.map(UserId::new),
            created_time: model.created_time,
            modified_by: model.modified_by.map(UserId::new),
            modified_time: model.modified_time,
            reason_private: model.reason_private,
            reason_public: model.reason_public,
            comments: model.comments.map(Metadata::Encoded),
            params: model.params.map(Metadata::Encoded),
        }
    }
}

/// Column values for inserting or updating a ban row
pub struct BanWrite<'a> {
    pub id: i64,
    pub user_id: Option<i64>,
    pub ip: Option<&'a str>,
    pub blocked: bool,
    pub expiration: Option<DateTime<Utc>>,
    pub created_by: Option<i64>,
    pub created_time: Option<DateTime<Utc>>,
    pub modified_by: Option<i64>,
    pub modified_time: Option<DateTime<Utc>>,
    pub reason_private: &'a str,
    pub reason_public: &'a str,
    pub comments: Option<String>,
    pub params: Option<String>,
}

impl<'a> BanWrite<'a> {
    /// Prepare a record for writing; metadata is encoded on the way
    pub fn new(record: &'a BanRecord) -> Result<Self, DomainError> {
        Ok(Self {
            id: record.id.into_inner(),
            user_id: record.user_id.filter(UserId::is_valid).map(UserId::into_inner),
            ip: record.ip.as_deref().filter(|ip| !ip.is_empty()),
            blocked: record.blocked,
            expiration: record.expiration,
            created_by: record.created_by.map(UserId::into_inner),
            created_time: record.created_time,
            modified_by: record.modified_by.map(UserId::into_inner),
            modified_time: record.modified_time,
            reason_private: &record.reason_private,
            reason_public: &record.reason_public,
            comments: encode(record.comments.as_ref(), "comments")?,
            params: encode(record.params.as_ref(), "params")?,
        })
    }
}

fn encode(value: Option<&Metadata>, field: &'static str) -> Result<Option<String>, DomainError> {
    value.map(|m| m.encode(field)).transpose()
}
