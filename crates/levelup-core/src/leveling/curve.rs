//! Level curve - XP cost per level and the total-XP inversion
//!
//! The curve is linear in the level index: advancing out of level `L` costs
//! `BASE_XP * (L + 1)`. All arithmetic is on `i64`; lifetime XP stays far
//! below the point where that could wrap.

/// XP cost of the very first level
pub const BASE_XP: i64 = 100;

/// XP required to advance from `level` to `level + 1`
///
/// Strictly increasing in `level`. Callers never pass a negative level;
/// levels only ever advance upward from zero.
#[inline]
pub const fn xp_cost(level: i64) -> i64 {
    BASE_XP * (level + 1)
}

/// Total XP required to have completed every level below `level`
///
/// Closed form of `sum(xp_cost(i) for i in 0..level)`. Diagnostic helper;
/// the hot path uses [`level_progress`] instead.
#[inline]
pub const fn cumulative_xp_for(level: i64) -> i64 {
    BASE_XP * level * (level + 1) / 2
}

/// A position on the level curve derived from lifetime XP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    /// Number of fully completed level thresholds
    pub level: i64,
    /// XP accumulated inside the current level
    pub xp_into_level: i64,
    /// XP still needed to reach the next level (remaining, not the full threshold)
    pub xp_to_next_level: i64,
}

/// Derive level, in-level XP, and remaining XP from lifetime XP
///
/// Subtracts `xp_cost(level)` from a running remainder for as long as the
/// remainder covers the current threshold. Terminates because `xp_cost` is
/// strictly positive and the remainder strictly decreases.
pub fn level_progress(total_xp: i64) -> LevelProgress {
    let mut level: i64 = 0;
    let mut remainder = total_xp.max(0);

    while remainder >= xp_cost(level) {
        remainder -= xp_cost(level);
        level += 1;
    }

    LevelProgress {
        level,
        xp_into_level: remainder,
        xp_to_next_level: xp_cost(level) - remainder,
    }
}

/// Level reached at the given lifetime XP
#[inline]
pub fn level_for_xp(total_xp: i64) -> i64 {
    level_progress(total_xp).level
}
