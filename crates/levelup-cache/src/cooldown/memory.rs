//! In-process cooldown gate
//!
//! Sufficient for a single-process deployment only: the last-seen map lives
//! in this process, so a second engine instance would keep its own windows.
//! Multi-instance deployments use [`RedisCooldownGate`].
//!
//! [`RedisCooldownGate`]: super::RedisCooldownGate

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use levelup_core::leveling::cooldown;
use levelup_core::traits::{CooldownGate, RepoResult};
use levelup_core::value_objects::Snowflake;

/// Last-seen-timestamp map keyed by (guild, user)
///
/// The dashmap entry API holds the key's shard lock across the decision, so
/// check and record are one step.
#[derive(Debug, Default)]
pub struct MemoryCooldownGate {
    last_seen: DashMap<(i64, i64), DateTime<Utc>>,
}

impl MemoryCooldownGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }

    /// Drop entries older than `max_age`; the map would otherwise grow with
    /// every user ever seen. Hosts call this from a periodic task.
    pub fn purge_stale(&self, max_age: Duration, now: DateTime<Utc>) -> usize {
        let before = self.last_seen.len();
        self.last_seen
            .retain(|_, last| now.signed_duration_since(*last) < max_age);
        before - self.last_seen.len()
    }
}

#[async_trait]
impl CooldownGate for MemoryCooldownGate {
    async fn try_acquire(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        cooldown_seconds: i64,
        now: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let key = (guild_id.into_inner(), user_id.into_inner());

        match self.last_seen.entry(key) {
            Entry::Occupied(mut occupied) => {
                if cooldown::is_allowed(Some(*occupied.get()), cooldown_seconds, now) {
                    occupied.insert(now);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(now);
                Ok(true)
            }
        }
    }
}
