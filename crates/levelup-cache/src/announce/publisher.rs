//! Redis Pub/Sub publisher for leveling announcements and events.
//!
//! The engine itself never talks to the chat platform. Rendered level-up
//! lines go onto a pub/sub topic and the delivery process (the bot) drains
//! it; domain events go onto a per-guild topic for anything else that wants
//! to observe leveling activity.

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use levelup_core::error::DomainError;
use levelup_core::events::LevelingEvent;
use levelup_core::traits::{NotificationSink, RepoResult};
use levelup_core::value_objects::Snowflake;

use crate::pool::{RedisPool, RedisResult};

/// Topic carrying rendered announcements for the delivery process
const ANNOUNCE_TOPIC: &str = "levelup:announcements";
/// Per-guild topic prefix for domain events
const EVENTS_PREFIX: &str = "levelup:events:";

/// A rendered announcement addressed to one channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub channel_id: Snowflake,
    pub text: String,
}

impl Announcement {
    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct AnnouncementPublisher {
    pool: RedisPool,
}

impl AnnouncementPublisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish a domain event to its guild's topic
    pub async fn publish_event(&self, event: &LevelingEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let topic = format!("{EVENTS_PREFIX}{}", event.guild_id());
        let payload = serde_json::to_string(event)?;

        let receivers: u32 = conn.publish(&topic, &payload).await?;

        tracing::debug!(
            topic = %topic,
            event_type = %event.event_type(),
            receivers = receivers,
            "Published leveling event"
        );

        Ok(receivers)
    }
}

impl std::fmt::Debug for AnnouncementPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnouncementPublisher").finish()
    }
}

#[async_trait]
impl NotificationSink for AnnouncementPublisher {
    async fn deliver(&self, channel_id: Snowflake, text: &str) -> RepoResult<()> {
        let announcement = Announcement {
            channel_id,
            text: text.to_string(),
        };
        let payload = announcement
            .to_json()
            .map_err(|e| DomainError::NotificationError(e.to_string()))?;

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| DomainError::NotificationError(e.to_string()))?;

        let receivers: u32 = conn
            .publish(ANNOUNCE_TOPIC, &payload)
            .await
            .map_err(|e| DomainError::NotificationError(e.to_string()))?;

        tracing::debug!(
            channel_id = %channel_id,
            receivers = receivers,
            "Published announcement"
        );

        Ok(())
    }
}
