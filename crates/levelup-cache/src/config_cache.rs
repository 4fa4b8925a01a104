//! TTL'd in-process cache for guild leveling configs
//!
//! Guild configs are read on every activity event but change rarely. Entries
//! expire after a short TTL and are invalidated explicitly when an admin
//! command updates the config, so a stale window only exists across engine
//! instances other than the one that took the update.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use levelup_core::entities::LevelingConfig;
use levelup_core::value_objects::Snowflake;

/// Per-guild config cache with a fixed TTL
#[derive(Debug)]
pub struct ConfigCache {
    entries: DashMap<i64, (LevelingConfig, Instant)>,
    ttl: Duration,
}

impl ConfigCache {
    /// Create a cache whose entries stay fresh for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Get a config if present and fresh
    pub fn get(&self, guild_id: Snowflake) -> Option<LevelingConfig> {
        let key = guild_id.into_inner();
        let entry = self.entries.get(&key)?;
        let (config, stored_at) = entry.value();

        if stored_at.elapsed() < self.ttl {
            Some(config.clone())
        } else {
            drop(entry);
            self.entries.remove(&key);
            None
        }
    }

    /// Store a config
    pub fn insert(&self, config: LevelingConfig) {
        self.entries
            .insert(config.guild_id.into_inner(), (config, Instant::now()));
    }

    /// Drop a guild's entry (config updated elsewhere)
    pub fn invalidate(&self, guild_id: Snowflake) {
        self.entries.remove(&guild_id.into_inner());
    }

    /// Number of cached guilds (fresh or not)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
