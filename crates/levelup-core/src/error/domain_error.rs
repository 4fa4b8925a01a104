//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Leveling config not found for guild: {0}")]
    ConfigNotFound(Snowflake),

    #[error("Progress not found for user {user_id} in guild {guild_id}")]
    ProgressNotFound {
        guild_id: Snowflake,
        user_id: Snowflake,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Missing guild identifier")]
    MissingGuildId,

    #[error("Missing user identifier")]
    MissingUserId,

    #[error("Invalid gain range: min {min} must be >= 1 and <= max {max}")]
    InvalidGainRange { min: i64, max: i64 },

    #[error("Invalid cooldown: {0} seconds")]
    InvalidCooldown(i64),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Internal Consistency
    // =========================================================================
    /// Stored level disagrees with the level derived from stored XP.
    /// Treated as a fatal internal bug, never silently repaired.
    #[error("Progress invariant violated: stored level {stored}, derived level {expected}")]
    ProgressInvariant { expected: i64, stored: i64 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Notification error: {0}")]
    NotificationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and outer layers
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigNotFound(_) => "UNKNOWN_CONFIG",
            Self::ProgressNotFound { .. } => "UNKNOWN_PROGRESS",

            Self::MissingGuildId => "MISSING_GUILD_ID",
            Self::MissingUserId => "MISSING_USER_ID",
            Self::InvalidGainRange { .. } => "INVALID_GAIN_RANGE",
            Self::InvalidCooldown(_) => "INVALID_COOLDOWN",
            Self::ValidationError(_) => "VALIDATION_ERROR",

            Self::ProgressInvariant { .. } => "PROGRESS_INVARIANT",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::NotificationError(_) => "NOTIFICATION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound(_) | Self::ProgressNotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingGuildId
                | Self::MissingUserId
                | Self::InvalidGainRange { .. }
                | Self::InvalidCooldown(_)
                | Self::ValidationError(_)
        )
    }
}
