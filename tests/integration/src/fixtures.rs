//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use ban_core::UserId;
use ban_service::CreateBanRequest;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Counter for unique test data
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> i64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Moderator performing actions in tests
pub const MODERATOR: UserId = UserId::new(1);

/// Start of every in-memory scenario
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// User id unlikely to collide with other runs against a shared database
pub fn unique_user_id() -> UserId {
    UserId::new(Utc::now().timestamp_micros() * 100 + unique_suffix() % 100)
}

/// Documentation-range IPv4 address, unique per call
pub fn unique_ip() -> String {
    let n = unique_suffix();
    format!("198.51.{}.{}", (n / 250) % 250, n % 250 + 1)
}

/// Permanent user ban
pub fn user_ban(user_id: UserId) -> CreateBanRequest {
    let mut request = CreateBanRequest::for_user(user_id);
    request.reason_public = "Violation of community rules".to_string();
    request.reason_private = "Repeated spam in support forum".to_string();
    request
}

/// IP ban expiring `after` from `now`
pub fn expiring_ip_ban(ip: &str, now: DateTime<Utc>, after: Duration) -> CreateBanRequest {
    let mut request = CreateBanRequest::for_ip(ip);
    request.expiration = Some(now + after);
    request
}
