//! PostgreSQL implementation of ProgressRepository
//!
//! `apply_gain` is the engine's critical write path. XP and the message
//! counter are applied as in-database increments so concurrent events for the
//! same key cannot lose updates, and the level column is re-derived from the
//! post-increment total inside the same transaction so the stored pair can
//! never drift apart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use levelup_core::entities::UserProgress;
use levelup_core::leveling::level_for_xp;
use levelup_core::traits::{AppliedGain, ProgressRepository, RepoResult};
use levelup_core::value_objects::Snowflake;

use crate::mappers::progress_from_model;
use crate::models::UserProgressModel;

use super::error::{map_db_error, progress_not_found};

/// PostgreSQL implementation of ProgressRepository
#[derive(Clone)]
pub struct PgProgressRepository {
    pool: PgPool,
}

impl PgProgressRepository {
    /// Create a new PgProgressRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressRepository for PgProgressRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<UserProgress>> {
        let result = sqlx::query_as::<_, UserProgressModel>(
            r#"
            SELECT guild_id, user_id, xp, level, message_count, last_event_at,
                   active, created_at, updated_at
            FROM user_progress
            WHERE guild_id = $1 AND user_id = $2
            "#,
        )
        .bind(guild_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(progress_from_model))
    }

    #[instrument(skip(self))]
    async fn apply_gain(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        gain: i64,
        now: DateTime<Utc>,
    ) -> RepoResult<AppliedGain> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Increment in the database; RETURNING carries the level column as it
        // was before this event, which is exactly the "previous level".
        let row = sqlx::query_as::<_, UserProgressModel>(
            r#"
            INSERT INTO user_progress
                (guild_id, user_id, xp, level, message_count, last_event_at,
                 active, created_at, updated_at)
            VALUES ($1, $2, $3, 0, 1, $4, TRUE, $4, $4)
            ON CONFLICT (guild_id, user_id) DO UPDATE
            SET xp = user_progress.xp + EXCLUDED.xp,
                message_count = user_progress.message_count + 1,
                last_event_at = EXCLUDED.last_event_at,
                active = TRUE,
                updated_at = EXCLUDED.updated_at
            RETURNING guild_id, user_id, xp, level, message_count, last_event_at,
                      active, created_at, updated_at
            "#,
        )
        .bind(guild_id.into_inner())
        .bind(user_id.into_inner())
        .bind(gain)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let previous_level = row.level;
        let new_level = level_for_xp(row.xp);

        if new_level != previous_level {
            sqlx::query(
                r#"
                UPDATE user_progress
                SET level = $3
                WHERE guild_id = $1 AND user_id = $2
                "#,
            )
            .bind(guild_id.into_inner())
            .bind(user_id.into_inner())
            .bind(new_level)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        let mut progress = progress_from_model(row);
        progress.level = new_level;

        Ok(AppliedGain {
            previous_level,
            progress,
        })
    }

    #[instrument(skip(self))]
    async fn reset(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<()> {
        // A user with no row is already at the zero state
        sqlx::query(
            r#"
            UPDATE user_progress
            SET xp = 0, level = 0, message_count = 0, updated_at = $3
            WHERE guild_id = $1 AND user_id = $2
            "#,
        )
        .bind(guild_id.into_inner())
        .bind(user_id.into_inner())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_active(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        active: bool,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE user_progress
            SET active = $3, updated_at = NOW()
            WHERE guild_id = $1 AND user_id = $2
            "#,
        )
        .bind(guild_id.into_inner())
        .bind(user_id.into_inner())
        .bind(active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(progress_not_found(guild_id, user_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn deactivate_guild(&self, guild_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE user_progress
            SET active = FALSE, updated_at = NOW()
            WHERE guild_id = $1 AND active = TRUE
            "#,
        )
        .bind(guild_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn list_active(&self, guild_id: Snowflake) -> RepoResult<Vec<UserProgress>> {
        let results = sqlx::query_as::<_, UserProgressModel>(
            r#"
            SELECT guild_id, user_id, xp, level, message_count, last_event_at,
                   active, created_at, updated_at
            FROM user_progress
            WHERE guild_id = $1 AND active = TRUE
            "#,
        )
        .bind(guild_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(progress_from_model).collect())
    }
}
