//! Domain events - emitted when leveling state changes
//!
//! These events are used for:
//! - Announcement publishing (level-ups)
//! - Audit logging
//! - Cache invalidation on configuration changes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// All leveling domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LevelingEvent {
    XpAwarded(XpAwardedEvent),
    LevelUp(LevelUpEvent),
    ProgressReset(ProgressResetEvent),
    ConfigUpdated(ConfigUpdatedEvent),
    GuildEnabled(GuildEnabledEvent),
    GuildDisabled(GuildDisabledEvent),
    MemberDeactivated(MemberDeactivatedEvent),
}

impl LevelingEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::XpAwarded(_) => "XP_AWARDED",
            Self::LevelUp(_) => "LEVEL_UP",
            Self::ProgressReset(_) => "PROGRESS_RESET",
            Self::ConfigUpdated(_) => "CONFIG_UPDATED",
            Self::GuildEnabled(_) => "GUILD_ENABLED",
            Self::GuildDisabled(_) => "GUILD_DISABLED",
            Self::MemberDeactivated(_) => "MEMBER_DEACTIVATED",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::XpAwarded(e) => e.timestamp,
            Self::LevelUp(e) => e.timestamp,
            Self::ProgressReset(e) => e.timestamp,
            Self::ConfigUpdated(e) => e.timestamp,
            Self::GuildEnabled(e) => e.timestamp,
            Self::GuildDisabled(e) => e.timestamp,
            Self::MemberDeactivated(e) => e.timestamp,
        }
    }

    /// Get the guild this event belongs to
    pub fn guild_id(&self) -> Snowflake {
        match self {
            Self::XpAwarded(e) => e.guild_id,
            Self::LevelUp(e) => e.guild_id,
            Self::ProgressReset(e) => e.guild_id,
            Self::ConfigUpdated(e) => e.guild_id,
            Self::GuildEnabled(e) => e.guild_id,
            Self::GuildDisabled(e) => e.guild_id,
            Self::MemberDeactivated(e) => e.guild_id,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpAwardedEvent {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    pub gain: i64,
    pub total_xp: i64,
    pub level: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelUpEvent {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    pub level: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResetEvent {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigUpdatedEvent {
    pub guild_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildEnabledEvent {
    pub guild_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildDisabledEvent {
    pub guild_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDeactivatedEvent {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}
