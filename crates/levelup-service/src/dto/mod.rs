//! Request and response DTOs

mod requests;
mod responses;

pub use requests::{ActivityEvent, UpdateConfigRequest};
pub use responses::{ActivityOutcome, ConfigResponse, LeaderboardEntry, RankResponse};
