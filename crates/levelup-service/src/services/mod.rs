//! Business logic services
//!
//! This module contains the service layer implementations that orchestrate
//! domain operations around the persistence and notification collaborators.

pub mod admin;
pub mod context;
pub mod error;
pub mod leveling;
pub mod rank;

// Re-export all services for convenience
pub use admin::AdminService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use leveling::LevelingService;
pub use rank::RankService;
