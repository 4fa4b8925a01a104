//! Inbound DTOs
//!
//! `ActivityEvent` is the engine's single inbound signal; the config request
//! implements `Validate` for field-level checks, with the min/max cross-field
//! check done in the admin service once the partial update is merged.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use levelup_core::Snowflake;

/// One qualifying user action, as observed by the host application
///
/// Ephemeral: consumed once by the orchestrator and never stored. Only its
/// effects are persisted.
#[derive(Debug, Clone, Copy)]
pub struct ActivityEvent {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    /// Channel the activity happened in; announcement fallback target
    pub channel_id: Option<Snowflake>,
    pub occurred_at: DateTime<Utc>,
}

impl ActivityEvent {
    /// Event happening now
    pub fn new(guild_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            guild_id,
            user_id,
            channel_id: None,
            occurred_at: Utc::now(),
        }
    }

    /// Event happening now in a specific channel
    pub fn in_channel(guild_id: Snowflake, user_id: Snowflake, channel_id: Snowflake) -> Self {
        Self {
            channel_id: Some(channel_id),
            ..Self::new(guild_id, user_id)
        }
    }

    /// Event with an explicit timestamp
    pub fn at(guild_id: Snowflake, user_id: Snowflake, occurred_at: DateTime<Utc>) -> Self {
        Self {
            guild_id,
            user_id,
            channel_id: None,
            occurred_at,
        }
    }
}

/// Partial update of a guild's leveling configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateConfigRequest {
    #[validate(range(min = 1, message = "Minimum gain must be at least 1"))]
    pub min_gain: Option<i64>,

    #[validate(range(min = 1, message = "Maximum gain must be at least 1"))]
    pub max_gain: Option<i64>,

    #[validate(range(min = 0, message = "Cooldown cannot be negative"))]
    pub cooldown_seconds: Option<i64>,

    /// Snowflake ID as string; empty string clears the channel
    pub announce_channel_id: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Template must be 1-500 characters"))]
    pub level_up_message: Option<String>,

    pub enabled: Option<bool>,
}
