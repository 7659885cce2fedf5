//! Domain entities - core business objects

mod ban;

pub use ban::{BanDecision, BanKey, BanLookup, BanRecord, MAX_IP_LENGTH};
