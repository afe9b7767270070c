//! # confess-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `confess-core`:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Repository implementations, including the reaction ledger and the
//!   atomic aggregate-counter updates

pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgAggregateRepository, PgCategoryRepository, PgCommentRepository, PgConfessionRepository,
    PgReactionRepository, PgUserRepository,
};
