//! Leveling config entity - per-guild XP settings

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Default XP awarded per qualifying message, lower bound
pub const DEFAULT_MIN_GAIN: i64 = 15;
/// Default XP awarded per qualifying message, upper bound
pub const DEFAULT_MAX_GAIN: i64 = 25;
/// Default minimum seconds between awards for one (guild, user) pair
pub const DEFAULT_COOLDOWN_SECONDS: i64 = 60;
/// Default announcement template; `{user}` and `{level}` are substituted
pub const DEFAULT_LEVEL_UP_MESSAGE: &str = "GG {user}, you just advanced to level {level}!";

/// Per-guild leveling configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelingConfig {
    pub guild_id: Snowflake,
    /// Minimum XP per activity event (>= 1)
    pub min_gain: i64,
    /// Maximum XP per activity event (>= min_gain)
    pub max_gain: i64,
    /// Minimum seconds between awards; 0 disables the cooldown
    pub cooldown_seconds: i64,
    /// Channel for level-up announcements; falls back to the event's channel
    pub announce_channel_id: Option<Snowflake>,
    /// Announcement template with `{user}` and `{level}` placeholders
    pub level_up_message: String,
    /// Cleared instead of deleting the row when the host leaves the guild
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LevelingConfig {
    /// Default configuration for a guild seen for the first time
    pub fn defaults(guild_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            guild_id,
            min_gain: DEFAULT_MIN_GAIN,
            max_gain: DEFAULT_MAX_GAIN,
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
            announce_channel_id: None,
            level_up_message: DEFAULT_LEVEL_UP_MESSAGE.to_string(),
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the configuration invariants
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.min_gain < 1 || self.max_gain < self.min_gain {
            return Err(DomainError::InvalidGainRange {
                min: self.min_gain,
                max: self.max_gain,
            });
        }
        if self.cooldown_seconds < 0 {
            return Err(DomainError::InvalidCooldown(self.cooldown_seconds));
        }
        Ok(())
    }

    /// Render the level-up announcement for a user mention and level
    pub fn render_level_up(&self, user_mention: &str, level: i64) -> String {
        self.level_up_message
            .replace("{user}", user_mention)
            .replace("{level}", &level.to_string())
    }

    /// Update the gain range
    pub fn set_gain_range(&mut self, min_gain: i64, max_gain: i64) {
        self.min_gain = min_gain;
        self.max_gain = max_gain;
        self.updated_at = Utc::now();
    }

    /// Update the cooldown window
    pub fn set_cooldown(&mut self, cooldown_seconds: i64) {
        self.cooldown_seconds = cooldown_seconds;
        self.updated_at = Utc::now();
    }

    /// Update the announcement channel
    pub fn set_announce_channel(&mut self, channel_id: Option<Snowflake>) {
        self.announce_channel_id = channel_id;
        self.updated_at = Utc::now();
    }

    /// Update the announcement template
    pub fn set_level_up_message(&mut self, template: String) {
        self.level_up_message = template;
        self.updated_at = Utc::now();
    }
}
