//! UserProgress entity <-> model mapper

use levelup_core::entities::UserProgress;
use levelup_core::value_objects::Snowflake;

use crate::models::UserProgressModel;

/// Convert UserProgressModel to UserProgress entity
impl From<UserProgressModel> for UserProgress {
    fn from(model: UserProgressModel) -> Self {
        UserProgress {
            guild_id: Snowflake::new(model.guild_id),
            user_id: Snowflake::new(model.user_id),
            xp: model.xp,
            level: model.level,
            message_count: model.message_count,
            last_event_at: model.last_event_at,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert a model into an entity (function form for iterator chains)
pub fn progress_from_model(model: UserProgressModel) -> UserProgress {
    UserProgress::from(model)
}
