//! Leveling config database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the leveling_configs table
#[derive(Debug, Clone, FromRow)]
pub struct LevelingConfigModel {
    pub guild_id: i64,
    pub min_gain: i64,
    pub max_gain: i64,
    pub cooldown_seconds: i64,
    pub announce_channel_id: Option<i64>,
    pub level_up_message: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
