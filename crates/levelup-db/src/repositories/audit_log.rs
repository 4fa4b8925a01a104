//! PostgreSQL implementation of AuditLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use levelup_core::entities::XpAuditEntry;
use levelup_core::traits::{AuditLogRepository, RepoResult};

use super::error::map_db_error;

/// PostgreSQL implementation of AuditLogRepository
///
/// Write-only from the engine's point of view; reads happen out of band
/// (dashboards, ad-hoc queries).
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    /// Create a new PgAuditLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self, entry))]
    async fn record(&self, entry: &XpAuditEntry) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO xp_audit_log
                (id, guild_id, user_id, gain, total_xp, level, leveled_up, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id.into_inner())
        .bind(entry.guild_id.into_inner())
        .bind(entry.user_id.into_inner())
        .bind(entry.gain)
        .bind(entry.total_xp)
        .bind(entry.level)
        .bind(entry.leveled_up)
        .bind(entry.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
