//! Error handling utilities for repositories

use levelup_core::error::DomainError;
use levelup_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "config not found" error
pub fn config_not_found(guild_id: Snowflake) -> DomainError {
    DomainError::ConfigNotFound(guild_id)
}

/// Create a "progress not found" error
pub fn progress_not_found(guild_id: Snowflake, user_id: Snowflake) -> DomainError {
    DomainError::ProgressNotFound { guild_id, user_id }
}
