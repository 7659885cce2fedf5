//! Ban database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the users_banned table
#[derive(Debug, Clone, FromRow)]
pub struct BanModel {
    pub id: i64,
    pub user_id: Option<i64>,
    pub ip: Option<String>,
    pub blocked: bool,
    pub expiration: Option<DateTime<Utc>>,
    pub created_by: Option<i64>,
    pub created_time: Option<DateTime<Utc>>,
    pub modified_by: Option<i64>,
    pub modified_time: Option<DateTime<Utc>>,
    pub reason_private: String,
    pub reason_public: String,
    pub comments: Option<String>,
    pub params: Option<String>,
}
