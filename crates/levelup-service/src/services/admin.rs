//! Admin service
//!
//! Command surface consumed by the host's moderation commands: configuration
//! updates, progress resets, and membership lifecycle transitions.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use levelup_core::error::DomainError;
use levelup_core::events::{
    ConfigUpdatedEvent, GuildDisabledEvent, GuildEnabledEvent, LevelingEvent,
    MemberDeactivatedEvent, ProgressResetEvent,
};
use levelup_core::Snowflake;

use crate::dto::{ConfigResponse, UpdateConfigRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch a guild's configuration (defaults if the guild was never seen)
    #[instrument(skip(self))]
    pub async fn get_config(&self, guild_id: Snowflake) -> ServiceResult<ConfigResponse> {
        if guild_id.is_zero() {
            return Err(DomainError::MissingGuildId.into());
        }

        let config = match self.ctx.config_repo().find(guild_id).await? {
            Some(config) => config,
            None => self.ctx.default_config_for(guild_id),
        };

        Ok(ConfigResponse::from(&config))
    }

    /// Apply a partial configuration update
    #[instrument(skip(self, request))]
    pub async fn set_config(
        &self,
        guild_id: Snowflake,
        request: UpdateConfigRequest,
    ) -> ServiceResult<ConfigResponse> {
        if guild_id.is_zero() {
            return Err(DomainError::MissingGuildId.into());
        }
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let mut config = match self.ctx.config_repo().find(guild_id).await? {
            Some(config) => config,
            None => self.ctx.default_config_for(guild_id),
        };

        if request.min_gain.is_some() || request.max_gain.is_some() {
            let min = request.min_gain.unwrap_or(config.min_gain);
            let max = request.max_gain.unwrap_or(config.max_gain);
            config.set_gain_range(min, max);
        }
        if let Some(cooldown) = request.cooldown_seconds {
            config.set_cooldown(cooldown);
        }
        if let Some(channel) = request.announce_channel_id {
            let channel_id = if channel.is_empty() {
                None
            } else {
                Some(Snowflake::parse(&channel).map_err(|_| {
                    ServiceError::validation("Invalid announce channel ID format")
                })?)
            };
            config.set_announce_channel(channel_id);
        }
        if let Some(template) = request.level_up_message {
            config.set_level_up_message(template);
        }
        if let Some(enabled) = request.enabled {
            config.enabled = enabled;
        }

        // Cross-field invariant (min <= max) after the partial merge
        config.validate()?;

        self.ctx.config_repo().upsert(&config).await?;
        self.ctx.config_cache().invalidate(guild_id);

        self.ctx
            .emit_event(LevelingEvent::ConfigUpdated(ConfigUpdatedEvent {
                guild_id,
                timestamp: Utc::now(),
            }));

        info!(guild_id = %guild_id, "Leveling config updated");

        Ok(ConfigResponse::from(&config))
    }

    /// Administrative reset: XP, level, and message count back to zero
    #[instrument(skip(self))]
    pub async fn reset_progress(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        if guild_id.is_zero() {
            return Err(DomainError::MissingGuildId.into());
        }
        if user_id.is_zero() {
            return Err(DomainError::MissingUserId.into());
        }

        self.ctx
            .progress_repo()
            .reset(guild_id, user_id, Utc::now())
            .await?;

        self.ctx
            .emit_event(LevelingEvent::ProgressReset(ProgressResetEvent {
                guild_id,
                user_id,
                timestamp: Utc::now(),
            }));

        info!(guild_id = %guild_id, user_id = %user_id, "Progress reset");

        Ok(())
    }

    /// Membership transition: user joined or left the guild
    #[instrument(skip(self))]
    pub async fn set_member_active(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        active: bool,
    ) -> ServiceResult<()> {
        if guild_id.is_zero() {
            return Err(DomainError::MissingGuildId.into());
        }
        if user_id.is_zero() {
            return Err(DomainError::MissingUserId.into());
        }

        self.ctx
            .progress_repo()
            .set_active(guild_id, user_id, active)
            .await?;

        if !active {
            self.ctx
                .emit_event(LevelingEvent::MemberDeactivated(MemberDeactivatedEvent {
                    guild_id,
                    user_id,
                    timestamp: Utc::now(),
                }));
        }

        Ok(())
    }

    /// Host added to or removed from a guild
    ///
    /// Disabling keeps every row but clears the config's enabled flag and
    /// drops all users from ranking; nothing is deleted.
    #[instrument(skip(self))]
    pub async fn set_guild_enabled(
        &self,
        guild_id: Snowflake,
        enabled: bool,
    ) -> ServiceResult<()> {
        if guild_id.is_zero() {
            return Err(DomainError::MissingGuildId.into());
        }

        let mut config = match self.ctx.config_repo().find(guild_id).await? {
            Some(config) => config,
            None => self.ctx.default_config_for(guild_id),
        };
        config.enabled = enabled;
        config.updated_at = Utc::now();

        self.ctx.config_repo().upsert(&config).await?;
        self.ctx.config_cache().invalidate(guild_id);

        if enabled {
            self.ctx
                .emit_event(LevelingEvent::GuildEnabled(GuildEnabledEvent {
                    guild_id,
                    timestamp: Utc::now(),
                }));
        } else {
            let deactivated = self.ctx.progress_repo().deactivate_guild(guild_id).await?;
            info!(guild_id = %guild_id, deactivated, "Guild leveling disabled");
            self.ctx
                .emit_event(LevelingEvent::GuildDisabled(GuildDisabledEvent {
                    guild_id,
                    timestamp: Utc::now(),
                }));
        }

        Ok(())
    }
}
