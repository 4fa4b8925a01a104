//! In-memory fakes of the engine's collaborators
//!
//! Each fake keeps its state behind a `Mutex` and mirrors the contract of
//! the real implementation, including the atomicity of `apply_gain`. The
//! recording fakes expose what they saw so tests can assert on side effects,
//! and carry a failure switch for exercising the best-effort paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use levelup_core::entities::{LevelingConfig, UserProgress, XpAuditEntry};
use levelup_core::error::DomainError;
use levelup_core::traits::{
    AppliedGain, AuditLogRepository, ConfigRepository, NotificationSink, ProgressRepository,
    RepoResult,
};
use levelup_core::Snowflake;

// ============================================================================
// Config Repository
// ============================================================================

/// In-memory ConfigRepository
#[derive(Debug, Default)]
pub struct MemoryConfigRepository {
    configs: Mutex<HashMap<i64, LevelingConfig>>,
}

impl MemoryConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a config directly, bypassing the trait
    pub fn seed(&self, config: LevelingConfig) {
        self.configs
            .lock()
            .unwrap()
            .insert(config.guild_id.into_inner(), config);
    }

    /// Number of stored configs
    pub fn len(&self) -> usize {
        self.configs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ConfigRepository for MemoryConfigRepository {
    async fn find(&self, guild_id: Snowflake) -> RepoResult<Option<LevelingConfig>> {
        Ok(self
            .configs
            .lock()
            .unwrap()
            .get(&guild_id.into_inner())
            .cloned())
    }

    async fn upsert(&self, config: &LevelingConfig) -> RepoResult<()> {
        self.configs
            .lock()
            .unwrap()
            .insert(config.guild_id.into_inner(), config.clone());
        Ok(())
    }

    async fn set_enabled(&self, guild_id: Snowflake, enabled: bool) -> RepoResult<()> {
        let mut configs = self.configs.lock().unwrap();
        match configs.get_mut(&guild_id.into_inner()) {
            Some(config) => {
                config.enabled = enabled;
                config.updated_at = Utc::now();
                Ok(())
            }
            None => Err(DomainError::ConfigNotFound(guild_id)),
        }
    }
}

// ============================================================================
// Progress Repository
// ============================================================================

/// In-memory ProgressRepository
///
/// `apply_gain` holds the map lock across read-increment-derive, matching
/// the single-transaction semantics of the PostgreSQL implementation.
#[derive(Debug, Default)]
pub struct MemoryProgressRepository {
    rows: Mutex<HashMap<(i64, i64), UserProgress>>,
    fail_writes: AtomicBool,
}

impl MemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a database error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed a progress row directly, bypassing the trait
    pub fn seed(&self, progress: UserProgress) {
        let key = (
            progress.guild_id.into_inner(),
            progress.user_id.into_inner(),
        );
        self.rows.lock().unwrap().insert(key, progress);
    }

    fn check_writable(&self) -> RepoResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError(
                "injected write failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for MemoryProgressRepository {
    async fn find(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<UserProgress>> {
        let key = (guild_id.into_inner(), user_id.into_inner());
        Ok(self.rows.lock().unwrap().get(&key).cloned())
    }

    async fn apply_gain(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        gain: i64,
        now: DateTime<Utc>,
    ) -> RepoResult<AppliedGain> {
        self.check_writable()?;

        let key = (guild_id.into_inner(), user_id.into_inner());
        let mut rows = self.rows.lock().unwrap();
        let progress = rows
            .entry(key)
            .or_insert_with(|| UserProgress::new(guild_id, user_id));

        let previous_level = progress.level;
        progress.grant(gain, now);

        Ok(AppliedGain {
            previous_level,
            progress: progress.clone(),
        })
    }

    async fn reset(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<()> {
        self.check_writable()?;

        let key = (guild_id.into_inner(), user_id.into_inner());
        if let Some(progress) = self.rows.lock().unwrap().get_mut(&key) {
            progress.reset(now);
        }
        Ok(())
    }

    async fn set_active(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        active: bool,
    ) -> RepoResult<()> {
        self.check_writable()?;

        let key = (guild_id.into_inner(), user_id.into_inner());
        match self.rows.lock().unwrap().get_mut(&key) {
            Some(progress) => {
                if active {
                    progress.reactivate(Utc::now());
                } else {
                    progress.deactivate(Utc::now());
                }
                Ok(())
            }
            None => Err(DomainError::ProgressNotFound { guild_id, user_id }),
        }
    }

    async fn deactivate_guild(&self, guild_id: Snowflake) -> RepoResult<u64> {
        self.check_writable()?;

        let mut count = 0;
        for progress in self.rows.lock().unwrap().values_mut() {
            if progress.guild_id == guild_id && progress.active {
                progress.deactivate(Utc::now());
                count += 1;
            }
        }
        Ok(count)
    }

    async fn list_active(&self, guild_id: Snowflake) -> RepoResult<Vec<UserProgress>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.guild_id == guild_id && p.active)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Audit Log
// ============================================================================

/// Recording AuditLogRepository
#[derive(Debug, Default)]
pub struct RecordingAuditLog {
    entries: Mutex<Vec<XpAuditEntry>>,
    fail: AtomicBool,
}

impl RecordingAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Everything recorded so far
    pub fn entries(&self) -> Vec<XpAuditEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLogRepository for RecordingAuditLog {
    async fn record(&self, entry: &XpAuditEntry) -> RepoResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError(
                "injected audit failure".to_string(),
            ));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

// ============================================================================
// Notification Sink
// ============================================================================

/// Recording NotificationSink
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    deliveries: Mutex<Vec<(Snowflake, String)>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Everything delivered so far, as (channel, text) pairs
    pub fn deliveries(&self) -> Vec<(Snowflake, String)> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn deliver(&self, channel_id: Snowflake, text: &str) -> RepoResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::NotificationError(
                "injected delivery failure".to_string(),
            ));
        }
        self.deliveries
            .lock()
            .unwrap()
            .push((channel_id, text.to_string()));
        Ok(())
    }
}
