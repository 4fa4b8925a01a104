//! XP audit log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the xp_audit_log table (write-only telemetry)
#[derive(Debug, Clone, FromRow)]
pub struct XpAuditModel {
    pub id: i64,
    pub guild_id: i64,
    pub user_id: i64,
    pub gain: i64,
    pub total_xp: i64,
    pub level: i64,
    pub leveled_up: bool,
    pub recorded_at: DateTime<Utc>,
}
