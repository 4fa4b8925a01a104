//! # levelup-service
//!
//! Application layer for the leveling engine. The orchestrator turns one
//! activity event into a persisted state transition plus best-effort side
//! effects; the rank and admin services cover the query and command surface
//! a host exposes to its users.

pub mod dto;
pub mod services;

pub use dto::{
    ActivityEvent, ActivityOutcome, ConfigResponse, LeaderboardEntry, RankResponse,
    UpdateConfigRequest,
};
pub use services::{
    AdminService, LevelingService, RankService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
