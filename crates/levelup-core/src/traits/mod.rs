//! Repository and collaborator traits (ports)

mod repositories;

pub use repositories::{
    AppliedGain, AuditLogRepository, ConfigRepository, CooldownGate, NotificationSink,
    ProgressRepository, RepoResult,
};
