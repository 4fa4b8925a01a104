//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layers
//! provide the implementations. Persistence lives in the database crate;
//! the cooldown gate and notification sink live in the cache crate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{LevelingConfig, UserProgress, XpAuditEntry};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Config Repository
// ============================================================================

#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Find the leveling config for a guild
    async fn find(&self, guild_id: Snowflake) -> RepoResult<Option<LevelingConfig>>;

    /// Insert or replace the config for a guild
    async fn upsert(&self, config: &LevelingConfig) -> RepoResult<()>;

    /// Flip the enabled flag without touching the rest of the config
    async fn set_enabled(&self, guild_id: Snowflake, enabled: bool) -> RepoResult<()>;
}

// ============================================================================
// Progress Repository
// ============================================================================

/// Result of an atomically applied gain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedGain {
    /// Level stored before this gain was applied
    pub previous_level: i64,
    /// The row after the gain, with the level already re-derived
    pub progress: UserProgress,
}

impl AppliedGain {
    /// Whether this gain crossed at least one level threshold
    #[inline]
    pub fn leveled_up(&self) -> bool {
        self.progress.level > self.previous_level
    }
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Find progress for a (guild, user) pair
    async fn find(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<UserProgress>>;

    /// Apply one accepted gain event as a single atomic write
    ///
    /// Implementations must add `gain` to the lifetime XP and bump the
    /// message count as in-storage increments (no read-modify-write in the
    /// application tier), re-derive the level from the resulting total via
    /// the level curve, and commit all of it atomically. A row is created at
    /// the zero state first if the pair was never seen.
    async fn apply_gain(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        gain: i64,
        now: DateTime<Utc>,
    ) -> RepoResult<AppliedGain>;

    /// Administrative reset: XP, level, and message count to zero
    async fn reset(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Mark a user active/inactive for ranking
    async fn set_active(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        active: bool,
    ) -> RepoResult<()>;

    /// Mark every user in a guild inactive (host removed from the guild)
    async fn deactivate_guild(&self, guild_id: Snowflake) -> RepoResult<u64>;

    /// All active progress records for a guild (order unspecified)
    async fn list_active(&self, guild_id: Snowflake) -> RepoResult<Vec<UserProgress>>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

/// Write-only telemetry sink; failures are logged and swallowed by callers
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Record one accepted gain event
    async fn record(&self, entry: &XpAuditEntry) -> RepoResult<()>;
}

// ============================================================================
// Cooldown Gate
// ============================================================================

/// Atomic check-and-set rate gate keyed by (guild, user)
///
/// `try_acquire` must decide and record in one step: two concurrent calls
/// inside the same window must not both return true. The in-process
/// implementation holds the key's shard lock across the decision; the Redis
/// implementation uses a single SET NX PX, which makes the gate safe across
/// multiple engine instances.
#[async_trait]
pub trait CooldownGate: Send + Sync {
    /// Returns true and records the event time if the window has elapsed
    async fn try_acquire(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        cooldown_seconds: i64,
        now: DateTime<Utc>,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Notification Sink
// ============================================================================

/// Best-effort outbound delivery of a rendered announcement
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver `text` to the given channel; failure never rolls back state
    async fn deliver(&self, channel_id: Snowflake, text: &str) -> RepoResult<()>;
}
