//! Service context - dependency container for services
//!
//! Holds the repositories, the cooldown gate, the notification sink, and the
//! other collaborators the services need.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use levelup_cache::{AnnouncementPublisher, ConfigCache};
use levelup_common::LevelingDefaults;
use levelup_core::entities::LevelingConfig;
use levelup_core::events::LevelingEvent;
use levelup_core::traits::{
    AuditLogRepository, ConfigRepository, CooldownGate, NotificationSink, ProgressRepository,
};
use levelup_core::{Snowflake, SnowflakeGenerator};

/// Default freshness window for cached guild configs
const DEFAULT_CONFIG_CACHE_TTL: Duration = Duration::from_secs(300);

/// Service context containing all dependencies
///
/// This is the dependency container passed to every service. It provides
/// access to:
/// - Database repositories
/// - The cooldown gate (in-process or shared)
/// - The notification sink and event publisher
/// - The config cache
/// - The snowflake generator for audit entry IDs
#[derive(Clone)]
pub struct ServiceContext {
    config_repo: Arc<dyn ConfigRepository>,
    progress_repo: Arc<dyn ProgressRepository>,
    audit_repo: Arc<dyn AuditLogRepository>,
    cooldown_gate: Arc<dyn CooldownGate>,
    notifier: Arc<dyn NotificationSink>,
    publisher: AnnouncementPublisher,
    config_cache: Arc<ConfigCache>,
    leveling_defaults: LevelingDefaults,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config_repo: Arc<dyn ConfigRepository>,
        progress_repo: Arc<dyn ProgressRepository>,
        audit_repo: Arc<dyn AuditLogRepository>,
        cooldown_gate: Arc<dyn CooldownGate>,
        notifier: Arc<dyn NotificationSink>,
        publisher: AnnouncementPublisher,
        config_cache: Arc<ConfigCache>,
        leveling_defaults: LevelingDefaults,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            config_repo,
            progress_repo,
            audit_repo,
            cooldown_gate,
            notifier,
            publisher,
            config_cache,
            leveling_defaults,
            snowflake_generator,
        }
    }

    // === Repositories ===

    /// Get the config repository
    pub fn config_repo(&self) -> &dyn ConfigRepository {
        self.config_repo.as_ref()
    }

    /// Get the progress repository
    pub fn progress_repo(&self) -> &dyn ProgressRepository {
        self.progress_repo.as_ref()
    }

    /// Get the audit log repository
    pub fn audit_repo(&self) -> &dyn AuditLogRepository {
        self.audit_repo.as_ref()
    }

    /// Get an owned handle to the audit log repository (for spawned writes)
    pub fn audit_handle(&self) -> Arc<dyn AuditLogRepository> {
        Arc::clone(&self.audit_repo)
    }

    // === Gate, sink, publisher ===

    /// Get the cooldown gate
    pub fn cooldown_gate(&self) -> &dyn CooldownGate {
        self.cooldown_gate.as_ref()
    }

    /// Get the notification sink
    pub fn notifier(&self) -> &dyn NotificationSink {
        self.notifier.as_ref()
    }

    /// Get an owned handle to the notification sink (for spawned deliveries)
    pub fn notifier_handle(&self) -> Arc<dyn NotificationSink> {
        Arc::clone(&self.notifier)
    }

    /// Get the event publisher
    pub fn publisher(&self) -> &AnnouncementPublisher {
        &self.publisher
    }

    /// Publish a domain event, fire-and-forget
    ///
    /// Event publishing never gates a state transition; failures are logged
    /// and swallowed.
    pub fn emit_event(&self, event: LevelingEvent) {
        let publisher = self.publisher.clone();
        tokio::spawn(async move {
            if let Err(e) = publisher.publish_event(&event).await {
                warn!(
                    event_type = event.event_type(),
                    error = %e,
                    "Failed to publish leveling event"
                );
            }
        });
    }

    // === Cache ===

    /// Get the guild config cache
    pub fn config_cache(&self) -> &ConfigCache {
        &self.config_cache
    }

    // === Defaults ===

    /// Config for a guild observed for the first time, using the host's
    /// configured fallback gain range and cooldown
    pub fn default_config_for(&self, guild_id: Snowflake) -> LevelingConfig {
        let mut config = LevelingConfig::defaults(guild_id);
        config.min_gain = self.leveling_defaults.min_gain;
        config.max_gain = self.leveling_defaults.max_gain;
        config.cooldown_seconds = self.leveling_defaults.cooldown_seconds;
        config
    }

    // === ID generation ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("cooldown_gate", &"...")
            .field("config_cache", &self.config_cache)
            .finish()
    }
}

/// Builder for creating ServiceContext
pub struct ServiceContextBuilder {
    config_repo: Option<Arc<dyn ConfigRepository>>,
    progress_repo: Option<Arc<dyn ProgressRepository>>,
    audit_repo: Option<Arc<dyn AuditLogRepository>>,
    cooldown_gate: Option<Arc<dyn CooldownGate>>,
    notifier: Option<Arc<dyn NotificationSink>>,
    publisher: Option<AnnouncementPublisher>,
    config_cache: Option<Arc<ConfigCache>>,
    leveling_defaults: Option<LevelingDefaults>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            config_repo: None,
            progress_repo: None,
            audit_repo: None,
            cooldown_gate: None,
            notifier: None,
            publisher: None,
            config_cache: None,
            leveling_defaults: None,
            snowflake_generator: None,
        }
    }

    pub fn config_repo(mut self, repo: Arc<dyn ConfigRepository>) -> Self {
        self.config_repo = Some(repo);
        self
    }

    pub fn progress_repo(mut self, repo: Arc<dyn ProgressRepository>) -> Self {
        self.progress_repo = Some(repo);
        self
    }

    pub fn audit_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_repo = Some(repo);
        self
    }

    pub fn cooldown_gate(mut self, gate: Arc<dyn CooldownGate>) -> Self {
        self.cooldown_gate = Some(gate);
        self
    }

    pub fn notifier(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notifier = Some(sink);
        self
    }

    pub fn publisher(mut self, publisher: AnnouncementPublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn config_cache(mut self, cache: Arc<ConfigCache>) -> Self {
        self.config_cache = Some(cache);
        self
    }

    pub fn leveling_defaults(mut self, defaults: LevelingDefaults) -> Self {
        self.leveling_defaults = Some(defaults);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Wire all three PostgreSQL repositories from one pool
    pub fn with_postgres(self, pool: levelup_db::PgPool) -> Self {
        use levelup_db::{PgAuditLogRepository, PgConfigRepository, PgProgressRepository};

        self.config_repo(Arc::new(PgConfigRepository::new(pool.clone())))
            .progress_repo(Arc::new(PgProgressRepository::new(pool.clone())))
            .audit_repo(Arc::new(PgAuditLogRepository::new(pool)))
    }

    /// Wire the shared cooldown gate, notification sink, and event publisher
    /// from one Redis pool
    ///
    /// The publisher doubles as the notification sink: rendered announcements
    /// go over pub/sub to the delivery process.
    pub fn with_redis(self, pool: levelup_cache::RedisPool) -> Self {
        use levelup_cache::RedisCooldownGate;

        let publisher = AnnouncementPublisher::new(pool.clone());
        self.cooldown_gate(Arc::new(RedisCooldownGate::new(pool)))
            .notifier(Arc::new(publisher.clone()))
            .publisher(publisher)
    }

    /// Apply the tunables from the shared application config
    ///
    /// # Panics
    /// Panics if the configured snowflake worker ID is out of range (>= 1024).
    pub fn with_app_config(self, config: &levelup_common::AppConfig) -> Self {
        let ttl = Duration::from_secs(config.leveling.config_cache_ttl_seconds);
        self.leveling_defaults(config.leveling.clone())
            .config_cache(Arc::new(ConfigCache::new(ttl)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a required dependency is missing.
    /// The config cache and snowflake generator fall back to defaults.
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.config_repo
                .ok_or_else(|| ServiceError::validation("config_repo is required"))?,
            self.progress_repo
                .ok_or_else(|| ServiceError::validation("progress_repo is required"))?,
            self.audit_repo
                .ok_or_else(|| ServiceError::validation("audit_repo is required"))?,
            self.cooldown_gate
                .ok_or_else(|| ServiceError::validation("cooldown_gate is required"))?,
            self.notifier
                .ok_or_else(|| ServiceError::validation("notifier is required"))?,
            self.publisher
                .ok_or_else(|| ServiceError::validation("publisher is required"))?,
            self.config_cache
                .unwrap_or_else(|| Arc::new(ConfigCache::new(DEFAULT_CONFIG_CACHE_TTL))),
            self.leveling_defaults.unwrap_or_default(),
            self.snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::default())),
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
