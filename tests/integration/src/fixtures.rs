//! Fixtures for wiring a service context from fakes

use std::sync::Arc;
use std::time::Duration;

use levelup_cache::{AnnouncementPublisher, ConfigCache, MemoryCooldownGate, RedisPool, RedisPoolConfig};
use levelup_core::entities::LevelingConfig;
use levelup_core::Snowflake;
use levelup_service::{ServiceContext, ServiceContextBuilder};

use crate::fakes::{
    MemoryConfigRepository, MemoryProgressRepository, RecordingAuditLog, RecordingNotifier,
};

/// A fully wired context plus handles to every fake behind it
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub config_repo: Arc<MemoryConfigRepository>,
    pub progress_repo: Arc<MemoryProgressRepository>,
    pub audit_log: Arc<RecordingAuditLog>,
    pub notifier: Arc<RecordingNotifier>,
    pub gate: Arc<MemoryCooldownGate>,
}

impl TestHarness {
    pub fn new() -> Self {
        let _ = levelup_common::try_init_tracing();

        let config_repo = Arc::new(MemoryConfigRepository::new());
        let progress_repo = Arc::new(MemoryProgressRepository::new());
        let audit_log = Arc::new(RecordingAuditLog::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let gate = Arc::new(MemoryCooldownGate::new());

        // Pool pointed at a closed port: building is lazy, and event
        // publishing is fire-and-forget, so tests run without Redis.
        let pool = RedisPool::new(RedisPoolConfig {
            url: "redis://127.0.0.1:6399".to_string(),
            max_connections: 2,
        })
        .expect("pool construction is offline");
        let publisher = AnnouncementPublisher::new(pool);

        let ctx = ServiceContextBuilder::new()
            .config_repo(config_repo.clone())
            .progress_repo(progress_repo.clone())
            .audit_repo(audit_log.clone())
            .cooldown_gate(gate.clone())
            .notifier(notifier.clone())
            .publisher(publisher)
            // Zero TTL so configs seeded mid-test are picked up immediately
            .config_cache(Arc::new(ConfigCache::new(Duration::ZERO)))
            .build()
            .expect("all context dependencies provided");

        Self {
            ctx,
            config_repo,
            progress_repo,
            audit_log,
            notifier,
            gate,
        }
    }

    /// Seed a guild config with a fixed gain and cooldown
    pub fn seed_config(&self, guild_id: Snowflake, min: i64, max: i64, cooldown: i64) {
        let mut config = LevelingConfig::defaults(guild_id);
        config.set_gain_range(min, max);
        config.set_cooldown(cooldown);
        self.config_repo.seed(config);
    }

    /// Seed a guild config that announces to a fixed channel
    pub fn seed_config_with_channel(
        &self,
        guild_id: Snowflake,
        min: i64,
        max: i64,
        cooldown: i64,
        channel_id: Snowflake,
    ) {
        let mut config = LevelingConfig::defaults(guild_id);
        config.set_gain_range(min, max);
        config.set_cooldown(cooldown);
        config.set_announce_channel(Some(channel_id));
        self.config_repo.seed(config);
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll until `cond` holds or ~500ms elapse; returns the final value
///
/// Spawned side effects (announcements, audit writes) land after the main
/// call returns, so assertions on them go through here.
pub async fn wait_until<F: Fn() -> bool>(cond: F) -> bool {
    for _ in 0..100 {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    cond()
}
