//! # levelup-cache
//!
//! Cache layer: the Redis connection pool, the cooldown gates (in-process
//! and shared), a TTL'd guild-config cache, and the announcement publisher.
//!
//! The cooldown gate is the piece that must be atomic per (guild, user) key.
//! [`MemoryCooldownGate`] is correct for a single engine process;
//! [`RedisCooldownGate`] moves the check-and-set into Redis so multiple
//! engine instances share one window.

pub mod announce;
pub mod config_cache;
pub mod cooldown;
pub mod pool;

pub use announce::{Announcement, AnnouncementPublisher};
pub use config_cache::ConfigCache;
pub use cooldown::{MemoryCooldownGate, RedisCooldownGate};
pub use pool::{create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};
