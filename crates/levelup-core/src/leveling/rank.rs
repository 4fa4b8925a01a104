//! Rank resolver - total ordering of a guild's progress records
//!
//! Ordering is descending by level, then descending by lifetime XP, then by
//! user id so the order is total. The sort runs fresh on every query; guild
//! populations are small enough that maintaining an incremental index is not
//! worth the bookkeeping.

use std::cmp::Ordering;

use crate::entities::UserProgress;
use crate::value_objects::Snowflake;

/// A user's resolved position within a guild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedUser {
    /// 1-based position in the guild ordering
    pub rank: i64,
    /// Number of records that participated in the ordering
    pub total_ranked: i64,
    pub level: i64,
    pub xp: i64,
}

/// Leaderboard comparator: level desc, XP desc, user id as the final tiebreak
fn compare(a: &UserProgress, b: &UserProgress) -> Ordering {
    b.level
        .cmp(&a.level)
        .then(b.xp.cmp(&a.xp))
        .then(a.user_id.cmp(&b.user_id))
}

/// Sort progress records into leaderboard order in place
pub fn order(records: &mut [UserProgress]) {
    records.sort_by(compare);
}

/// Resolve a single user's rank among the given records
///
/// Callers pass the guild's active records. Returns `None` when the user is
/// not among them (never active, or deactivated); the service layer surfaces
/// that as rank 0.
pub fn resolve(user_id: Snowflake, records: &[UserProgress]) -> Option<RankedUser> {
    let mut sorted: Vec<&UserProgress> = records.iter().collect();
    sorted.sort_by(|a, b| compare(a, b));

    let total_ranked = sorted.len() as i64;
    sorted.iter().position(|r| r.user_id == user_id).map(|idx| {
        let record = sorted[idx];
        RankedUser {
            rank: idx as i64 + 1,
            total_ranked,
            level: record.level,
            xp: record.xp,
        }
    })
}
