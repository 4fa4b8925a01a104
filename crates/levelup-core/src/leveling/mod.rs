//! Pure leveling computations
//!
//! Everything in this module is deterministic integer math (the gain roller
//! excepted) with no I/O. The orchestrator in the service layer composes
//! these pieces around the persistence and notification collaborators.

pub mod cooldown;
pub mod curve;
pub mod gain;
pub mod rank;

pub use curve::{cumulative_xp_for, level_for_xp, level_progress, xp_cost, LevelProgress, BASE_XP};
pub use rank::RankedUser;
