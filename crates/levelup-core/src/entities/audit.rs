//! Audit entry entity - write-only record of an accepted gain event

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// One accepted gain event, recorded best-effort for telemetry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpAuditEntry {
    /// Generated by the engine's snowflake generator
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    /// XP awarded by this event
    pub gain: i64,
    /// Lifetime XP after the award
    pub total_xp: i64,
    /// Level after the award
    pub level: i64,
    pub leveled_up: bool,
    pub recorded_at: DateTime<Utc>,
}

impl XpAuditEntry {
    pub fn new(
        id: Snowflake,
        guild_id: Snowflake,
        user_id: Snowflake,
        gain: i64,
        total_xp: i64,
        level: i64,
        leveled_up: bool,
    ) -> Self {
        Self {
            id,
            guild_id,
            user_id,
            gain,
            total_xp,
            level,
            leveled_up,
            recorded_at: Utc::now(),
        }
    }
}
