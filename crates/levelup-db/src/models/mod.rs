//! Database models (SQLx `FromRow` structs)

mod audit_log;
mod config;
mod progress;

pub use audit_log::XpAuditModel;
pub use config::LevelingConfigModel;
pub use progress::UserProgressModel;
