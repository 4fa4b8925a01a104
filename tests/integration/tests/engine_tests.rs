//! End-to-end scenarios for the leveling orchestrator
//!
//! Everything runs against in-memory fakes; see `fixtures::TestHarness`.

use chrono::{DateTime, Utc};

use integration_tests::{wait_until, TestHarness};
use levelup_core::traits::{ConfigRepository, ProgressRepository};
use levelup_core::{DomainError, Snowflake};
use levelup_service::{
    ActivityEvent, AdminService, LevelingService, ServiceError, UpdateConfigRequest,
};

const GUILD: Snowflake = Snowflake::new(100);
const USER: Snowflake = Snowflake::new(200);
const CHANNEL: Snowflake = Snowflake::new(300);

fn t(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

#[tokio::test]
async fn test_single_event_awards_within_range() {
    let harness = TestHarness::new();
    harness.seed_config(GUILD, 5, 5, 60);
    let service = LevelingService::new(&harness.ctx);

    let outcome = service
        .process_event(ActivityEvent::new(GUILD, USER))
        .await
        .unwrap();

    assert!(outcome.accepted);
    assert!(!outcome.leveled_up);
    assert_eq!(outcome.gain, 5);
    assert_eq!(outcome.new_level, 0);

    let progress = harness
        .progress_repo
        .find(GUILD, USER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.xp, 5);
    assert_eq!(progress.level, 0);
    assert_eq!(progress.message_count, 1);
}

#[tokio::test]
async fn test_twenty_events_reach_level_one_on_the_twentieth() {
    let harness = TestHarness::new();
    harness.seed_config(GUILD, 5, 5, 0);
    let service = LevelingService::new(&harness.ctx);

    for i in 1..=20 {
        let outcome = service
            .process_event(ActivityEvent::new(GUILD, USER))
            .await
            .unwrap();

        assert!(outcome.accepted);
        if i < 20 {
            assert!(!outcome.leveled_up, "leveled up early on event {i}");
            assert_eq!(outcome.new_level, 0);
        } else {
            assert!(outcome.leveled_up, "no level-up on event 20");
            assert_eq!(outcome.new_level, 1);
        }
    }

    let progress = harness
        .progress_repo
        .find(GUILD, USER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.xp, 100);
    assert_eq!(progress.level, 1);
    assert_eq!(progress.message_count, 20);
}

#[tokio::test]
async fn test_event_inside_cooldown_is_dropped_without_state_change() {
    let harness = TestHarness::new();
    harness.seed_config(GUILD, 5, 5, 60);
    let service = LevelingService::new(&harness.ctx);

    let first = service
        .process_event(ActivityEvent::at(GUILD, USER, t(0)))
        .await
        .unwrap();
    assert!(first.accepted);

    let second = service
        .process_event(ActivityEvent::at(GUILD, USER, t(10)))
        .await
        .unwrap();
    assert!(!second.accepted);
    assert!(!second.leveled_up);
    assert_eq!(second.gain, 0);

    let progress = harness
        .progress_repo
        .find(GUILD, USER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.xp, 5);
    assert_eq!(progress.message_count, 1);
}

#[tokio::test]
async fn test_event_at_cooldown_boundary_is_accepted() {
    let harness = TestHarness::new();
    harness.seed_config(GUILD, 5, 5, 60);
    let service = LevelingService::new(&harness.ctx);

    assert!(service
        .process_event(ActivityEvent::at(GUILD, USER, t(0)))
        .await
        .unwrap()
        .accepted);
    assert!(service
        .process_event(ActivityEvent::at(GUILD, USER, t(60)))
        .await
        .unwrap()
        .accepted);
}

#[tokio::test]
async fn test_admin_reset_zeroes_progress() {
    let harness = TestHarness::new();
    harness.seed_config(GUILD, 5, 5, 0);
    let leveling = LevelingService::new(&harness.ctx);
    let admin = AdminService::new(&harness.ctx);

    for _ in 0..25 {
        leveling
            .process_event(ActivityEvent::new(GUILD, USER))
            .await
            .unwrap();
    }
    let progress = harness
        .progress_repo
        .find(GUILD, USER)
        .await
        .unwrap()
        .unwrap();
    assert!(progress.xp > 0);

    admin.reset_progress(GUILD, USER).await.unwrap();

    let progress = harness
        .progress_repo
        .find(GUILD, USER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.xp, 0);
    assert_eq!(progress.level, 0);
    assert_eq!(progress.message_count, 0);
}

#[tokio::test]
async fn test_first_event_creates_default_config() {
    let harness = TestHarness::new();
    let service = LevelingService::new(&harness.ctx);

    assert!(harness.config_repo.is_empty());

    let outcome = service
        .process_event(ActivityEvent::new(GUILD, USER))
        .await
        .unwrap();

    assert!(outcome.accepted);
    assert!((15..=25).contains(&outcome.gain));

    let config = harness.config_repo.find(GUILD).await.unwrap().unwrap();
    assert_eq!(config.min_gain, 15);
    assert_eq!(config.max_gain, 25);
    assert_eq!(config.cooldown_seconds, 60);
}

#[tokio::test]
async fn test_disabled_guild_drops_events() {
    let harness = TestHarness::new();
    let admin = AdminService::new(&harness.ctx);
    let leveling = LevelingService::new(&harness.ctx);

    admin.set_guild_enabled(GUILD, false).await.unwrap();

    let outcome = leveling
        .process_event(ActivityEvent::new(GUILD, USER))
        .await
        .unwrap();
    assert!(!outcome.accepted);
    assert!(harness.progress_repo.find(GUILD, USER).await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_ids_are_rejected_before_io() {
    let harness = TestHarness::new();
    let service = LevelingService::new(&harness.ctx);

    let err = service
        .process_event(ActivityEvent::new(Snowflake::new(0), USER))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::MissingGuildId)
    ));

    let err = service
        .process_event(ActivityEvent::new(GUILD, Snowflake::new(0)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::MissingUserId)
    ));

    // Nothing was created for either malformed event
    assert!(harness.config_repo.is_empty());
}

#[tokio::test]
async fn test_level_up_announcement_uses_template_and_channel() {
    let harness = TestHarness::new();
    harness.seed_config_with_channel(GUILD, 100, 100, 0, CHANNEL);
    let service = LevelingService::new(&harness.ctx);

    let outcome = service
        .process_event(ActivityEvent::new(GUILD, USER))
        .await
        .unwrap();
    assert!(outcome.leveled_up);

    assert!(wait_until(|| !harness.notifier.deliveries().is_empty()).await);

    let deliveries = harness.notifier.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].0, CHANNEL);
    assert_eq!(
        deliveries[0].1,
        "GG <@200>, you just advanced to level 1!"
    );
}

#[tokio::test]
async fn test_announcement_falls_back_to_source_channel() {
    let harness = TestHarness::new();
    harness.seed_config(GUILD, 100, 100, 0);
    let service = LevelingService::new(&harness.ctx);

    let source = Snowflake::new(777);
    service
        .process_event(ActivityEvent::in_channel(GUILD, USER, source))
        .await
        .unwrap();

    assert!(wait_until(|| !harness.notifier.deliveries().is_empty()).await);
    assert_eq!(harness.notifier.deliveries()[0].0, source);
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_the_event() {
    let harness = TestHarness::new();
    harness.seed_config_with_channel(GUILD, 100, 100, 0, CHANNEL);
    harness.notifier.fail(true);
    let service = LevelingService::new(&harness.ctx);

    let outcome = service
        .process_event(ActivityEvent::new(GUILD, USER))
        .await
        .unwrap();

    // The XP write is authoritative even when the announcement is lost
    assert!(outcome.accepted);
    assert!(outcome.leveled_up);
    let progress = harness
        .progress_repo
        .find(GUILD, USER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.xp, 100);
}

#[tokio::test]
async fn test_audit_entries_are_recorded_best_effort() {
    let harness = TestHarness::new();
    harness.seed_config(GUILD, 5, 5, 0);
    let service = LevelingService::new(&harness.ctx);

    service
        .process_event(ActivityEvent::new(GUILD, USER))
        .await
        .unwrap();

    assert!(wait_until(|| !harness.audit_log.entries().is_empty()).await);

    let entries = harness.audit_log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].guild_id, GUILD);
    assert_eq!(entries[0].gain, 5);
    assert_eq!(entries[0].total_xp, 5);
    assert!(!entries[0].id.is_zero());

    // Audit failure is swallowed; the next event still lands
    harness.audit_log.fail(true);
    let outcome = service
        .process_event(ActivityEvent::new(GUILD, USER))
        .await
        .unwrap();
    assert!(outcome.accepted);
}

#[tokio::test]
async fn test_persistence_failure_abandons_the_event() {
    let harness = TestHarness::new();
    harness.seed_config(GUILD, 5, 5, 0);
    harness.progress_repo.fail_writes(true);
    let service = LevelingService::new(&harness.ctx);

    let result = service.process_event(ActivityEvent::new(GUILD, USER)).await;
    assert!(result.is_err());

    // No partial state was committed
    harness.progress_repo.fail_writes(false);
    assert!(harness.progress_repo.find(GUILD, USER).await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_config_merges_and_validates() {
    let harness = TestHarness::new();
    let admin = AdminService::new(&harness.ctx);

    let response = admin
        .set_config(
            GUILD,
            UpdateConfigRequest {
                min_gain: Some(10),
                max_gain: Some(20),
                cooldown_seconds: Some(30),
                announce_channel_id: Some("300".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(response.min_gain, 10);
    assert_eq!(response.max_gain, 20);
    assert_eq!(response.cooldown_seconds, 30);
    assert_eq!(response.announce_channel_id.as_deref(), Some("300"));

    // Partial update keeps the other fields
    let response = admin
        .set_config(
            GUILD,
            UpdateConfigRequest {
                cooldown_seconds: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(response.min_gain, 10);
    assert_eq!(response.cooldown_seconds, 0);
}

#[tokio::test]
async fn test_set_config_rejects_inverted_range() {
    let harness = TestHarness::new();
    let admin = AdminService::new(&harness.ctx);

    let err = admin
        .set_config(
            GUILD,
            UpdateConfigRequest {
                min_gain: Some(50),
                max_gain: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::InvalidGainRange { min: 50, max: 10 })
    ));
    // Nothing was persisted
    assert!(harness.config_repo.is_empty());
}

#[tokio::test]
async fn test_set_config_rejects_bad_channel_id() {
    let harness = TestHarness::new();
    let admin = AdminService::new(&harness.ctx);

    let err = admin
        .set_config(
            GUILD,
            UpdateConfigRequest {
                announce_channel_id: Some("not-a-snowflake".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_set_config_clears_channel_with_empty_string() {
    let harness = TestHarness::new();
    harness.seed_config_with_channel(GUILD, 5, 5, 0, CHANNEL);
    let admin = AdminService::new(&harness.ctx);

    let response = admin
        .set_config(
            GUILD,
            UpdateConfigRequest {
                announce_channel_id: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(response.announce_channel_id.is_none());
}

#[tokio::test]
async fn test_disabling_guild_deactivates_members() {
    let harness = TestHarness::new();
    harness.seed_config(GUILD, 5, 5, 0);
    let leveling = LevelingService::new(&harness.ctx);
    let admin = AdminService::new(&harness.ctx);

    leveling
        .process_event(ActivityEvent::new(GUILD, Snowflake::new(201)))
        .await
        .unwrap();
    leveling
        .process_event(ActivityEvent::new(GUILD, Snowflake::new(202)))
        .await
        .unwrap();

    admin.set_guild_enabled(GUILD, false).await.unwrap();

    assert!(harness
        .progress_repo
        .list_active(GUILD)
        .await
        .unwrap()
        .is_empty());

    // And subsequent events are dropped
    let outcome = leveling
        .process_event(ActivityEvent::new(GUILD, USER))
        .await
        .unwrap();
    assert!(!outcome.accepted);
}

#[tokio::test]
async fn test_guild_cooldowns_are_per_user() {
    let harness = TestHarness::new();
    harness.seed_config(GUILD, 5, 5, 60);
    let service = LevelingService::new(&harness.ctx);

    assert!(service
        .process_event(ActivityEvent::at(GUILD, Snowflake::new(201), t(0)))
        .await
        .unwrap()
        .accepted);
    // Different user, same instant: independent window
    assert!(service
        .process_event(ActivityEvent::at(GUILD, Snowflake::new(202), t(0)))
        .await
        .unwrap()
        .accepted);
}

#[tokio::test]
async fn test_cooldown_window_reopens_after_reset_period() {
    let harness = TestHarness::new();
    harness.seed_config(GUILD, 5, 5, 60);
    let service = LevelingService::new(&harness.ctx);

    let times = [0, 59, 60, 61, 120];
    let mut accepted = Vec::new();
    for secs in times {
        let outcome = service
            .process_event(ActivityEvent::at(GUILD, USER, t(secs)))
            .await
            .unwrap();
        accepted.push(outcome.accepted);
    }

    assert_eq!(accepted, vec![true, false, true, false, true]);

    let progress = harness
        .progress_repo
        .find(GUILD, USER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.message_count, 3);
}
