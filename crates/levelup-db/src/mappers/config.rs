//! LevelingConfig entity <-> model mapper

use levelup_core::entities::LevelingConfig;
use levelup_core::value_objects::Snowflake;

use crate::models::LevelingConfigModel;

/// Convert LevelingConfigModel to LevelingConfig entity
impl From<LevelingConfigModel> for LevelingConfig {
    fn from(model: LevelingConfigModel) -> Self {
        LevelingConfig {
            guild_id: Snowflake::new(model.guild_id),
            min_gain: model.min_gain,
            max_gain: model.max_gain,
            cooldown_seconds: model.cooldown_seconds,
            announce_channel_id: model.announce_channel_id.map(Snowflake::new),
            level_up_message: model.level_up_message,
            enabled: model.enabled,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert a model into an entity (function form for iterator chains)
pub fn config_from_model(model: LevelingConfigModel) -> LevelingConfig {
    LevelingConfig::from(model)
}
