//! PostgreSQL repository implementations

mod audit_log;
mod config;
mod error;
mod progress;

pub use audit_log::PgAuditLogRepository;
pub use config::PgConfigRepository;
pub use progress::PgProgressRepository;
