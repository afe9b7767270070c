//! # confess-common
//!
//! Shared utilities: configuration loading, application errors, pseudonym
//! generation, password hashing, and tracing setup.

pub mod auth;
pub mod config;
pub mod error;
pub mod pseudonym;
pub mod telemetry;

pub use auth::{hash_password, verify_password, PasswordError};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    GatewayPolicyConfig, RateLimitConfig, ReactionConfig, RedisConfig, ServerConfig,
    SnowflakeConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use pseudonym::generate_pseudonym;
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
