//! Outbound DTOs
//!
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use serde::Serialize;

use levelup_core::entities::LevelingConfig;
use levelup_core::leveling::level_progress;
use levelup_core::{Snowflake, UserProgress};

/// Outcome of one processed activity event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityOutcome {
    /// Whether the event passed validation, the enabled check, and the gate
    pub accepted: bool,
    pub leveled_up: bool,
    /// Level after the event (0 when the event was dropped)
    pub new_level: i64,
    /// XP awarded (0 when the event was dropped)
    pub gain: i64,
}

impl ActivityOutcome {
    /// A silently dropped event (cooldown, disabled guild)
    pub fn dropped() -> Self {
        Self {
            accepted: false,
            leveled_up: false,
            new_level: 0,
            gain: 0,
        }
    }

    /// An accepted event
    pub fn accepted(leveled_up: bool, new_level: i64, gain: i64) -> Self {
        Self {
            accepted: true,
            leveled_up,
            new_level,
            gain,
        }
    }
}

/// A user's rank within a guild
#[derive(Debug, Clone, Serialize)]
pub struct RankResponse {
    pub user_id: String,
    /// 1-based position; 0 means the user is not ranked in this guild
    pub rank: i64,
    pub total_ranked: i64,
    pub level: i64,
    pub xp: i64,
    pub xp_into_level: i64,
    /// XP still needed to reach the next level
    pub xp_to_next_level: i64,
}

impl RankResponse {
    /// Response for a user with no active progress in the guild
    pub fn unranked(user_id: Snowflake, total_ranked: i64) -> Self {
        let progress = level_progress(0);
        Self {
            user_id: user_id.to_string(),
            rank: 0,
            total_ranked,
            level: 0,
            xp: 0,
            xp_into_level: progress.xp_into_level,
            xp_to_next_level: progress.xp_to_next_level,
        }
    }
}

/// One leaderboard row
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub position: i64,
    pub user_id: String,
    pub level: i64,
    pub xp: i64,
    pub message_count: i64,
}

impl LeaderboardEntry {
    pub fn from_progress(position: i64, progress: &UserProgress) -> Self {
        Self {
            position,
            user_id: progress.user_id.to_string(),
            level: progress.level,
            xp: progress.xp,
            message_count: progress.message_count,
        }
    }
}

/// Guild configuration as seen by the command surface
#[derive(Debug, Clone, Serialize)]
pub struct ConfigResponse {
    pub guild_id: String,
    pub min_gain: i64,
    pub max_gain: i64,
    pub cooldown_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announce_channel_id: Option<String>,
    pub level_up_message: String,
    pub enabled: bool,
}

impl From<&LevelingConfig> for ConfigResponse {
    fn from(config: &LevelingConfig) -> Self {
        Self {
            guild_id: config.guild_id.to_string(),
            min_gain: config.min_gain,
            max_gain: config.max_gain,
            cooldown_seconds: config.cooldown_seconds,
            announce_channel_id: config.announce_channel_id.map(|id| id.to_string()),
            level_up_message: config.level_up_message.clone(),
            enabled: config.enabled,
        }
    }
}
