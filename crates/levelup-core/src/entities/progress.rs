//! User progress entity - lifetime XP and derived level per (guild, user)

use chrono::{DateTime, Utc};

use crate::leveling::curve::level_for_xp;
use crate::value_objects::Snowflake;

/// Per-(guild, user) leveling progress
///
/// `level` is always derived from `xp` via the level curve. Every mutator on
/// this type recomputes it; code that writes the fields directly (mappers,
/// test fixtures) is expected to keep the pair consistent, and
/// [`UserProgress::is_consistent`] exists so callers can verify that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProgress {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    /// Lifetime XP; only an administrative reset ever lowers it
    pub xp: i64,
    /// Derived: `level_for_xp(xp)`
    pub level: i64,
    /// Qualifying activity events accepted so far
    pub message_count: i64,
    /// Timestamp of the last accepted event
    pub last_event_at: Option<DateTime<Utc>>,
    /// Whether the user participates in ranking
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProgress {
    /// Zero-state progress, created lazily on a user's first event
    pub fn new(guild_id: Snowflake, user_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            guild_id,
            user_id,
            xp: 0,
            level: 0,
            message_count: 0,
            last_event_at: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an accepted gain event; returns whether the level increased
    pub fn grant(&mut self, gain: i64, now: DateTime<Utc>) -> bool {
        let previous_level = self.level;

        self.xp += gain;
        self.level = level_for_xp(self.xp);
        self.message_count += 1;
        self.last_event_at = Some(now);
        self.active = true;
        self.updated_at = now;

        self.level > previous_level
    }

    /// Administrative reset back to the zero state
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.xp = 0;
        self.level = 0;
        self.message_count = 0;
        self.updated_at = now;
    }

    /// Remove the user from ranking (left the guild)
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.active = false;
        self.updated_at = now;
    }

    /// Put the user back into ranking (rejoined)
    pub fn reactivate(&mut self, now: DateTime<Utc>) {
        self.active = true;
        self.updated_at = now;
    }

    /// Whether the stored level matches the level derived from stored XP
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.level == level_for_xp(self.xp)
    }
}
