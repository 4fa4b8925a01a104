//! # levelup-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `levelup-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! The progress repository is where the engine's one non-negotiable write
//! lives: XP and message counters are applied as in-database increments and
//! the level column is re-derived inside the same transaction, so a row can
//! never carry a level that disagrees with its XP.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgAuditLogRepository, PgConfigRepository, PgProgressRepository};
