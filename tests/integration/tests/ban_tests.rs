//! End-to-end ban enforcement tests on the in-memory adapters
//!
//! Run with: cargo test -p integration-tests --test ban_tests

use std::sync::Arc;

use ban_core::{BanDecision, BanId, BanKey, BanLookup, BanRecord, Clock, Metadata, UserId};
use ban_service::{BanResolver, BanStore, LiftBanRequest, UpdateBanRequest};
use chrono::Duration;
use integration_tests::{expiring_ip_ban, user_ban, MemoryHarness, MODERATOR};
use serde_json::json;

fn cited(decision: &BanDecision) -> Option<BanId> {
    decision.record().map(|r| r.id)
}

// ============================================================================
// Expiration
// ============================================================================

#[tokio::test]
async fn test_permanent_ban_applies_at_any_future_time() {
    let h = MemoryHarness::with_users(&[7]);
    let service = h.service();
    service.create(MODERATOR, user_ban(UserId::new(7))).await.unwrap();

    for step in [Duration::seconds(1), Duration::days(30), Duration::days(36_500)] {
        h.clock.advance(step);
        assert!(service.check_user(UserId::new(7)).await.unwrap().is_banned());
    }
}

#[tokio::test]
async fn test_expired_ban_visible_only_to_any_lookup() {
    let h = MemoryHarness::with_users(&[]);
    let service = h.service();
    let now = h.clock.now();
    let id = service
        .create(MODERATOR, expiring_ip_ban("203.0.113.5", now, Duration::hours(1)))
        .await
        .unwrap();

    h.clock.advance(Duration::hours(1) + Duration::seconds(1));

    let store = BanStore::new(&h.ctx);
    assert!(!store.find_active_by_ip("203.0.113.5").await.unwrap().is_found());
    let any = store.find_any_by_ip("203.0.113.5").await.unwrap();
    assert_eq!(any.record().map(|r| r.id), Some(id));
    assert_eq!(
        service.check_ip("203.0.113.5").await.unwrap(),
        BanDecision::NotBanned
    );
}

#[tokio::test]
async fn test_expired_regardless_of_blocked_flag() {
    let h = MemoryHarness::with_users(&[]);
    let service = h.service();
    let mut request = expiring_ip_ban("203.0.113.6", h.clock.now(), Duration::minutes(1));
    request.blocked = true;
    service.create(MODERATOR, request).await.unwrap();

    h.clock.advance(Duration::minutes(2));
    assert!(!service.check_ip("203.0.113.6").await.unwrap().is_banned());
}

// ============================================================================
// Ordering and precedence
// ============================================================================

#[tokio::test]
async fn test_latest_active_record_wins() {
    let h = MemoryHarness::with_users(&[3]);
    let store = BanStore::new(&h.ctx);

    let mut ids = Vec::new();
    for _ in 0..9 {
        ids.push(store.save(BanRecord::for_user(UserId::new(3))).await.unwrap());
    }
    let (fifth, ninth) = (ids[4], ids[8]);
    assert_eq!((fifth, ninth), (BanId::new(5), BanId::new(9)));

    let lookup = store.find_active_by_user(UserId::new(3)).await.unwrap();
    assert_eq!(lookup.record().map(|r| r.id), Some(ninth));
}

#[tokio::test]
async fn test_newer_expired_record_does_not_hide_older_active_one() {
    let h = MemoryHarness::with_users(&[3]);
    let store = BanStore::new(&h.ctx);
    let now = h.clock.now();

    let active = store.save(BanRecord::for_user(UserId::new(3))).await.unwrap();
    let mut expired = BanRecord::for_user(UserId::new(3));
    expired.expiration = Some(now - Duration::days(1));
    let newest = store.save(expired).await.unwrap();

    let lookup = store.find_active_by_user(UserId::new(3)).await.unwrap();
    assert_eq!(lookup.record().map(|r| r.id), Some(active));
    let any = store.find_any_by_user(UserId::new(3)).await.unwrap();
    assert_eq!(any.record().map(|r| r.id), Some(newest));
}

#[tokio::test]
async fn test_user_ban_takes_precedence_over_ip_ban() {
    let h = MemoryHarness::with_users(&[7]);
    let service = h.service();
    let user = service.create(MODERATOR, user_ban(UserId::new(7))).await.unwrap();
    service
        .create(MODERATOR, ban_service::CreateBanRequest::for_ip("1.2.3.4"))
        .await
        .unwrap();

    let decision = service
        .check_combined(Some(UserId::new(7)), Some("1.2.3.4"))
        .await
        .unwrap();
    assert_eq!(cited(&decision), Some(user));
}

#[tokio::test]
async fn test_zero_user_falls_back_to_ip_ban() {
    let h = MemoryHarness::with_users(&[]);
    let service = h.service();
    let ip = service
        .create(MODERATOR, ban_service::CreateBanRequest::for_ip("1.2.3.4"))
        .await
        .unwrap();

    let decision = BanResolver::new(&h.ctx)
        .check_combined(Some(UserId::new(0)), Some("1.2.3.4"))
        .await
        .unwrap();
    assert_eq!(cited(&decision), Some(ip));
}

#[tokio::test]
async fn test_unbanned_user_on_clean_ip() {
    let h = MemoryHarness::with_users(&[7]);
    let decision = h
        .service()
        .check_combined(Some(UserId::new(7)), Some("192.0.2.1"))
        .await
        .unwrap();
    assert_eq!(decision, BanDecision::NotBanned);
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_unknown_user_rejected_and_not_persisted() {
    let h = MemoryHarness::with_users(&[]);
    let service = h.service();

    let err = service
        .create(MODERATOR, user_ban(UserId::new(42)))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let lookup = BanStore::new(&h.ctx)
        .find_any_by_user(UserId::new(42))
        .await
        .unwrap();
    assert_eq!(lookup, BanLookup::NotFound(BanKey::User(UserId::new(42))));
    assert!(h.repo.is_empty());
}

#[tokio::test]
async fn test_ip_only_ban_ignores_identity_state() {
    let h = MemoryHarness::with_users(&[]);
    h.identity.remove_user(MODERATOR);

    let id = h
        .service()
        .create(MODERATOR, ban_service::CreateBanRequest::for_ip("9.9.9.9"))
        .await
        .unwrap();
    assert!(id.is_valid());
}

#[tokio::test]
async fn test_orphaned_record_rejected() {
    let h = MemoryHarness::with_users(&[]);
    let err = h
        .service()
        .save(BanRecord::with_keys(None, None))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "ORPHANED_BAN");
    assert!(h.repo.is_empty());
}

// ============================================================================
// Metadata
// ============================================================================

#[tokio::test]
async fn test_structured_params_round_trip() {
    let h = MemoryHarness::with_users(&[]);
    let service = h.service();
    let params = json!({
        "trigger": "post_flood",
        "threshold": {"posts": 20, "seconds": 60},
        "categories": [3, 8, 13]
    });

    let mut request = ban_service::CreateBanRequest::for_ip("10.0.0.8");
    request.params = Some(Metadata::from(params.clone()));
    let id = service.create(MODERATOR, request).await.unwrap();

    let stored = BanStore::new(&h.ctx).find_by_id(id).await.unwrap().unwrap();
    assert!(matches!(stored.params, Some(Metadata::Encoded(_))));
    assert_eq!(stored.decoded_params().unwrap(), Some(params.clone()));
    assert_eq!(service.get_ban(id).await.unwrap().params, Some(params));
}

#[tokio::test]
async fn test_encoded_comments_are_stored_unchanged() {
    let h = MemoryHarness::with_users(&[]);
    let mut record = BanRecord::for_ip("10.0.0.9");
    record.comments = Some(Metadata::from("[{\"comment\":\"x\"}]".to_string()));
    let id = h.service().save(record).await.unwrap();

    let stored = BanStore::new(&h.ctx).find_by_id(id).await.unwrap().unwrap();
    assert_eq!(
        stored.comments.as_ref().and_then(Metadata::as_encoded),
        Some("[{\"comment\":\"x\"}]")
    );
}

#[tokio::test]
async fn test_malformed_metadata_rejected() {
    let h = MemoryHarness::with_users(&[]);
    let mut request = ban_service::CreateBanRequest::for_ip("10.0.0.10");
    request.params = Some(Metadata::from(json!(17)));

    let err = h.service().create(MODERATOR, request).await.unwrap_err();
    assert_eq!(err.error_code(), "MALFORMED_METADATA");
    assert!(h.repo.is_empty());
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_lift_then_rebanned() {
    let h = MemoryHarness::with_users(&[7]);
    let service = h.service();
    let first = service.create(MODERATOR, user_ban(UserId::new(7))).await.unwrap();

    service
        .lift(first, MODERATOR, LiftBanRequest::default())
        .await
        .unwrap();
    assert!(!service.check_user(UserId::new(7)).await.unwrap().is_banned());

    h.clock.advance(Duration::days(1));
    let second = service.create(MODERATOR, user_ban(UserId::new(7))).await.unwrap();
    let decision = service.check_user(UserId::new(7)).await.unwrap();
    assert_eq!(cited(&decision), Some(second));

    let history = service.user_history(UserId::new(7)).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].active);
    assert!(!history[1].active);
}

#[tokio::test]
async fn test_shorten_then_extend() {
    let h = MemoryHarness::with_users(&[]);
    let service = h.service();
    let now = h.clock.now();
    let id = service
        .create(MODERATOR, expiring_ip_ban("172.16.0.1", now, Duration::days(7)))
        .await
        .unwrap();

    service
        .extend(id, MODERATOR, Some(now + Duration::hours(1)))
        .await
        .unwrap();
    h.clock.advance(Duration::hours(2));
    assert!(!service.check_ip("172.16.0.1").await.unwrap().is_banned());

    let ban = service
        .extend(id, MODERATOR, Some(h.clock.now() + Duration::days(1)))
        .await
        .unwrap();
    assert!(ban.active);
    assert!(service.check_ip("172.16.0.1").await.unwrap().is_banned());
}

#[tokio::test]
async fn test_update_keeps_keys_and_created_audit() {
    let h = MemoryHarness::with_users(&[7]);
    let service = h.service();
    let mut request = user_ban(UserId::new(7));
    request.ip = Some("192.0.2.44".to_string());
    let id = service.create(MODERATOR, request).await.unwrap();
    let created = service.get_ban(id).await.unwrap();

    h.clock.advance(Duration::minutes(30));
    let update = UpdateBanRequest {
        blocked: Some(false),
        reason_private: Some("reviewed".to_string()),
        ..Default::default()
    };
    let updated = service.update(id, UserId::new(7), update).await.unwrap();

    assert_eq!(updated.user_id, Some(UserId::new(7)));
    assert_eq!(updated.ip.as_deref(), Some("192.0.2.44"));
    assert_eq!(updated.created_by, created.created_by);
    assert_eq!(updated.created_time, created.created_time);
    assert_eq!(updated.modified_time, Some(h.clock.now()));
    assert!(!updated.blocked);
    assert_eq!(h.repo.len(), 1);
}

#[tokio::test]
async fn test_ban_on_deleted_account_can_still_be_lifted() {
    let h = MemoryHarness::with_users(&[7]);
    let service = h.service();
    let mut request = user_ban(UserId::new(7));
    request.ip = Some("7.7.7.8".to_string());
    let id = service.create(MODERATOR, request).await.unwrap();

    h.identity.remove_user(UserId::new(7));
    assert!(service.check_ip("7.7.7.8").await.unwrap().is_banned());

    let lifted = service
        .lift(id, MODERATOR, LiftBanRequest::default())
        .await
        .unwrap();
    assert!(!lifted.active);
    assert!(!service.check_ip("7.7.7.8").await.unwrap().is_banned());
    assert!(!service.check_user(UserId::new(7)).await.unwrap().is_banned());
}

#[tokio::test]
async fn test_lift_with_mapping_comments() {
    let h = MemoryHarness::with_users(&[]);
    let service = h.service();
    let mut request = ban_service::CreateBanRequest::for_ip("10.0.0.11");
    request.comments = Some(Metadata::from(json!({"note": "x"})));
    let id = service.create(MODERATOR, request).await.unwrap();

    let lift = LiftBanRequest {
        comment: Some("appeal".to_string()),
    };
    let ban = service.lift(id, MODERATOR, lift).await.unwrap();
    let comments = ban.comments.unwrap();
    assert_eq!(comments[0], json!({"note": "x"}));
    assert_eq!(comments[1]["comment"], "appeal");
    assert!(!service.check_ip("10.0.0.11").await.unwrap().is_banned());
}

#[tokio::test]
async fn test_oversized_ip_rejected_before_storage() {
    let h = MemoryHarness::with_users(&[]);
    let err = h
        .service()
        .save(BanRecord::for_ip("x".repeat(200)))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(!err.is_storage_unavailable());
    assert!(h.repo.is_empty());
}

// ============================================================================
// Failures and concurrency
// ============================================================================

#[tokio::test]
async fn test_storage_unavailable_is_distinct_from_not_banned() {
    let h = MemoryHarness::with_users(&[7]);
    let service = h.service();
    h.repo.set_unavailable(true);

    let err = service.check_user(UserId::new(7)).await.unwrap_err();
    assert!(err.is_storage_unavailable());
    assert_eq!(err.status_code(), 503);

    let err = service
        .create(MODERATOR, user_ban(UserId::new(7)))
        .await
        .unwrap_err();
    assert!(err.is_storage_unavailable());

    h.repo.set_unavailable(false);
    assert!(h.repo.is_empty());
}

#[tokio::test]
async fn test_concurrent_checks_and_writes() {
    let h = Arc::new(MemoryHarness::with_users(&[]));
    let ips: Vec<String> = (0..32).map(|i| format!("100.64.0.{i}")).collect();

    let writers = ips.iter().cloned().map(|ip| {
        let h = Arc::clone(&h);
        tokio::spawn(async move {
            h.service()
                .create(MODERATOR, ban_service::CreateBanRequest::for_ip(ip))
                .await
        })
    });
    for result in futures::future::join_all(writers).await {
        assert!(result.unwrap().is_ok());
    }

    let readers = ips.iter().cloned().map(|ip| {
        let h = Arc::clone(&h);
        tokio::spawn(async move { h.service().check_ip(&ip).await })
    });
    for result in futures::future::join_all(readers).await {
        assert!(result.unwrap().unwrap().is_banned());
    }
    assert_eq!(h.repo.len(), 32);
}
