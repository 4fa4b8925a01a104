//! Leveling service
//!
//! The orchestrator: turns one activity event into a persisted state
//! transition and, on a level-up, an outbound announcement. Events inside a
//! cooldown window or in a disabled guild are dropped silently; a dropped
//! event is indistinguishable from ordinary activity to the end user.

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use levelup_core::entities::{LevelingConfig, XpAuditEntry};
use levelup_core::error::DomainError;
use levelup_core::events::{LevelUpEvent, LevelingEvent, XpAwardedEvent};
use levelup_core::leveling::{gain, level_for_xp};
use levelup_core::Snowflake;

use crate::dto::{ActivityEvent, ActivityOutcome};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Leveling service
pub struct LevelingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LevelingService<'a> {
    /// Create a new LevelingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Process one activity event
    ///
    /// The persisted write is a single atomic upsert; the announcement and
    /// the audit entry are fire-and-forget and never fail the transition.
    #[instrument(skip(self), fields(guild_id = %event.guild_id, user_id = %event.user_id))]
    pub async fn process_event(&self, event: ActivityEvent) -> ServiceResult<ActivityOutcome> {
        // Reject malformed events before any I/O
        if event.guild_id.is_zero() {
            return Err(DomainError::MissingGuildId.into());
        }
        if event.user_id.is_zero() {
            return Err(DomainError::MissingUserId.into());
        }

        let config = self.load_config(event.guild_id).await?;
        if !config.enabled {
            debug!("Leveling disabled for guild, event dropped");
            return Ok(ActivityOutcome::dropped());
        }

        // Check-and-set on the gate; a refusal is silent rate limiting
        let allowed = self
            .ctx
            .cooldown_gate()
            .try_acquire(
                event.guild_id,
                event.user_id,
                config.cooldown_seconds,
                event.occurred_at,
            )
            .await?;
        if !allowed {
            debug!("Event inside cooldown window, dropped");
            return Ok(ActivityOutcome::dropped());
        }

        let rolled = gain::roll(config.min_gain, config.max_gain);

        // The one write that matters: atomic increment plus level derivation
        let applied = self
            .ctx
            .progress_repo()
            .apply_gain(event.guild_id, event.user_id, rolled, event.occurred_at)
            .await?;
        let progress = &applied.progress;

        // A level/XP mismatch after the write is an internal bug, not data
        if !progress.is_consistent() {
            return Err(DomainError::ProgressInvariant {
                expected: level_for_xp(progress.xp),
                stored: progress.level,
            }
            .into());
        }

        let leveled_up = applied.leveled_up();

        if leveled_up {
            self.announce_level_up(&config, &event, progress.level);
            self.ctx.emit_event(LevelingEvent::LevelUp(LevelUpEvent {
                guild_id: event.guild_id,
                user_id: event.user_id,
                level: progress.level,
                timestamp: Utc::now(),
            }));
        }
        self.ctx.emit_event(LevelingEvent::XpAwarded(XpAwardedEvent {
            guild_id: event.guild_id,
            user_id: event.user_id,
            gain: rolled,
            total_xp: progress.xp,
            level: progress.level,
            timestamp: Utc::now(),
        }));

        self.record_audit(&event, rolled, progress.xp, progress.level, leveled_up);

        info!(
            gain = rolled,
            total_xp = progress.xp,
            level = progress.level,
            leveled_up,
            "XP awarded"
        );

        Ok(ActivityOutcome::accepted(leveled_up, progress.level, rolled))
    }

    /// Guild config via the cache, falling back to the repository, falling
    /// back to persisted defaults for a guild seen for the first time
    async fn load_config(&self, guild_id: Snowflake) -> ServiceResult<LevelingConfig> {
        if let Some(config) = self.ctx.config_cache().get(guild_id) {
            return Ok(config);
        }

        if let Some(config) = self.ctx.config_repo().find(guild_id).await? {
            self.ctx.config_cache().insert(config.clone());
            return Ok(config);
        }

        let config = self.ctx.default_config_for(guild_id);
        self.ctx.config_repo().upsert(&config).await?;
        self.ctx.config_cache().insert(config.clone());
        info!(guild_id = %guild_id, "Created default leveling config");

        Ok(config)
    }

    /// Render and deliver the level-up announcement, fire-and-forget
    fn announce_level_up(&self, config: &LevelingConfig, event: &ActivityEvent, level: i64) {
        let Some(channel_id) = config.announce_channel_id.or(event.channel_id) else {
            debug!("Level-up with no announce channel and no source channel");
            return;
        };

        let mention = format!("<@{}>", event.user_id);
        let text = config.render_level_up(&mention, level);

        let notifier = self.ctx.notifier_handle();
        tokio::spawn(async move {
            if let Err(e) = notifier.deliver(channel_id, &text).await {
                warn!(
                    channel_id = %channel_id,
                    error = %e,
                    "Level-up announcement failed"
                );
            }
        });
    }

    /// Record the accepted event in the audit log, fire-and-forget
    fn record_audit(
        &self,
        event: &ActivityEvent,
        gain: i64,
        total_xp: i64,
        level: i64,
        leveled_up: bool,
    ) {
        let entry = XpAuditEntry::new(
            self.ctx.generate_id(),
            event.guild_id,
            event.user_id,
            gain,
            total_xp,
            level,
            leveled_up,
        );

        let audit = self.ctx.audit_handle();
        tokio::spawn(async move {
            if let Err(e) = audit.record(&entry).await {
                warn!(error = %e, "XP audit write failed");
            }
        });
    }
}
