//! Rank service
//!
//! Query side of the engine: a single user's rank and the guild leaderboard.
//! Both fetch the guild's active records and sort fresh per query.

use tracing::instrument;

use levelup_core::error::DomainError;
use levelup_core::leveling::{level_progress, rank};
use levelup_core::Snowflake;

use crate::dto::{LeaderboardEntry, RankResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Maximum leaderboard page size
const MAX_LEADERBOARD_LIMIT: usize = 100;

/// Rank service
pub struct RankService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RankService<'a> {
    /// Create a new RankService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve one user's rank within a guild
    ///
    /// A user with no active progress gets rank 0 ("unranked") rather than
    /// an error; rank cards render that state themselves.
    #[instrument(skip(self))]
    pub async fn rank_of(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<RankResponse> {
        if guild_id.is_zero() {
            return Err(DomainError::MissingGuildId.into());
        }
        if user_id.is_zero() {
            return Err(DomainError::MissingUserId.into());
        }

        let records = self.ctx.progress_repo().list_active(guild_id).await?;

        match rank::resolve(user_id, &records) {
            Some(ranked) => {
                let curve = level_progress(ranked.xp);
                Ok(RankResponse {
                    user_id: user_id.to_string(),
                    rank: ranked.rank,
                    total_ranked: ranked.total_ranked,
                    level: ranked.level,
                    xp: ranked.xp,
                    xp_into_level: curve.xp_into_level,
                    xp_to_next_level: curve.xp_to_next_level,
                })
            }
            None => Ok(RankResponse::unranked(user_id, records.len() as i64)),
        }
    }

    /// The guild leaderboard, best first, at most `limit` rows
    #[instrument(skip(self))]
    pub async fn leaderboard(
        &self,
        guild_id: Snowflake,
        limit: usize,
    ) -> ServiceResult<Vec<LeaderboardEntry>> {
        if guild_id.is_zero() {
            return Err(DomainError::MissingGuildId.into());
        }

        let limit = limit.clamp(1, MAX_LEADERBOARD_LIMIT);

        let mut records = self.ctx.progress_repo().list_active(guild_id).await?;
        rank::order(&mut records);
        records.truncate(limit);

        Ok(records
            .iter()
            .enumerate()
            .map(|(idx, progress)| LeaderboardEntry::from_progress(idx as i64 + 1, progress))
            .collect())
    }
}
