//! # levelup-core
//!
//! Domain layer containing entities, value objects, the pure leveling
//! computations, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, cache, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod leveling;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{LevelingConfig, UserProgress, XpAuditEntry};
pub use error::DomainError;
pub use events::LevelingEvent;
pub use leveling::{
    cumulative_xp_for, level_for_xp, level_progress, xp_cost, LevelProgress, RankedUser, BASE_XP,
};
pub use traits::{
    AppliedGain, AuditLogRepository, ConfigRepository, CooldownGate, NotificationSink,
    ProgressRepository, RepoResult,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
