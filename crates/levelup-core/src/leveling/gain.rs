//! Gain roller - uniform XP award within a configured inclusive range

use rand::Rng;

/// Roll an XP gain in `[min, max]` using the thread-local RNG
///
/// Uniform over the inclusive range; not cryptographic. Fairness across the
/// range is the only correctness requirement.
pub fn roll(min: i64, max: i64) -> i64 {
    roll_with(&mut rand::thread_rng(), min, max)
}

/// Roll with a caller-supplied RNG (deterministic in tests)
pub fn roll_with<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    debug_assert!(min >= 1, "gain minimum must be positive");
    debug_assert!(max >= min, "gain range must be non-empty");

    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}
