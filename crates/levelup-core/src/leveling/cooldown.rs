//! Cooldown rule - decides whether a gain event is inside the rate window
//!
//! This is only the pure decision. The check-and-set that makes the decision
//! atomic per (guild, user) key lives behind the [`CooldownGate`] trait and
//! its implementations in the cache layer.
//!
//! [`CooldownGate`]: crate::traits::CooldownGate

use chrono::{DateTime, Duration, Utc};

/// Whether a new gain event is allowed given the last accepted event
///
/// A user with no recorded event is always allowed. A non-positive cooldown
/// disables rate limiting entirely.
pub fn is_allowed(
    last_event_at: Option<DateTime<Utc>>,
    cooldown_seconds: i64,
    now: DateTime<Utc>,
) -> bool {
    if cooldown_seconds <= 0 {
        return true;
    }

    match last_event_at {
        None => true,
        Some(last) => now.signed_duration_since(last) >= Duration::seconds(cooldown_seconds),
    }
}
