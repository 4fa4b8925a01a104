//! PostgreSQL implementation of ConfigRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use levelup_core::entities::LevelingConfig;
use levelup_core::traits::{ConfigRepository, RepoResult};
use levelup_core::value_objects::Snowflake;

use crate::mappers::config_from_model;
use crate::models::LevelingConfigModel;

use super::error::{config_not_found, map_db_error};

/// PostgreSQL implementation of ConfigRepository
#[derive(Clone)]
pub struct PgConfigRepository {
    pool: PgPool,
}

impl PgConfigRepository {
    /// Create a new PgConfigRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigRepository for PgConfigRepository {
    #[instrument(skip(self))]
    async fn find(&self, guild_id: Snowflake) -> RepoResult<Option<LevelingConfig>> {
        let result = sqlx::query_as::<_, LevelingConfigModel>(
            r#"
            SELECT guild_id, min_gain, max_gain, cooldown_seconds, announce_channel_id,
                   level_up_message, enabled, created_at, updated_at
            FROM leveling_configs
            WHERE guild_id = $1
            "#,
        )
        .bind(guild_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(config_from_model))
    }

    #[instrument(skip(self, config))]
    async fn upsert(&self, config: &LevelingConfig) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO leveling_configs
                (guild_id, min_gain, max_gain, cooldown_seconds, announce_channel_id,
                 level_up_message, enabled, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (guild_id) DO UPDATE
            SET min_gain = $2,
                max_gain = $3,
                cooldown_seconds = $4,
                announce_channel_id = $5,
                level_up_message = $6,
                enabled = $7,
                updated_at = $9
            "#,
        )
        .bind(config.guild_id.into_inner())
        .bind(config.min_gain)
        .bind(config.max_gain)
        .bind(config.cooldown_seconds)
        .bind(config.announce_channel_id.map(Snowflake::into_inner))
        .bind(&config.level_up_message)
        .bind(config.enabled)
        .bind(config.created_at)
        .bind(config.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_enabled(&self, guild_id: Snowflake, enabled: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE leveling_configs
            SET enabled = $2, updated_at = NOW()
            WHERE guild_id = $1
            "#,
        )
        .bind(guild_id.into_inner())
        .bind(enabled)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(config_not_found(guild_id));
        }

        Ok(())
    }
}
