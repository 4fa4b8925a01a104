//! Shared cooldown gate backed by Redis
//!
//! The entire decision is one `SET key value NX PX window` round trip: the
//! key exists for exactly the cooldown window, so whichever instance sets it
//! first owns the event and every other attempt inside the window sees NX
//! fail. No clocks are compared across instances.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use levelup_core::error::DomainError;
use levelup_core::traits::{CooldownGate, RepoResult};
use levelup_core::value_objects::Snowflake;

use crate::pool::RedisPool;

/// Key prefix for cooldown windows
const COOLDOWN_PREFIX: &str = "levelup:cooldown:";

/// Redis-backed cooldown gate, safe across engine instances
#[derive(Debug, Clone)]
pub struct RedisCooldownGate {
    pool: RedisPool,
}

impl RedisCooldownGate {
    /// Create a new RedisCooldownGate
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(guild_id: Snowflake, user_id: Snowflake) -> String {
        format!("{COOLDOWN_PREFIX}{guild_id}:{user_id}")
    }
}

#[async_trait]
impl CooldownGate for RedisCooldownGate {
    async fn try_acquire(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        cooldown_seconds: i64,
        now: DateTime<Utc>,
    ) -> RepoResult<bool> {
        if cooldown_seconds <= 0 {
            return Ok(true);
        }

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))?;

        // NX: only set if absent. PX: expire after the window. A reply of
        // OK means this call claimed the window; nil means it was taken.
        let reply: Option<String> = redis::cmd("SET")
            .arg(Self::key(guild_id, user_id))
            .arg(now.timestamp_millis())
            .arg("NX")
            .arg("PX")
            .arg(cooldown_seconds * 1000)
            .query_async(&mut conn)
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))?;

        Ok(reply.is_some())
    }
}
