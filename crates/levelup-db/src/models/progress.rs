//! User progress database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the user_progress table
#[derive(Debug, Clone, FromRow)]
pub struct UserProgressModel {
    pub guild_id: i64,
    pub user_id: i64,
    pub xp: i64,
    pub level: i64,
    pub message_count: i64,
    pub last_event_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
