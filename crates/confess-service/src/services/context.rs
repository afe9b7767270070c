//! Service context - dependency container for services
//!
//! Holds all repositories, the publisher, and other dependencies needed
//! by services.

use std::sync::Arc;

use confess_cache::{Publisher, SharedRedisPool};
use confess_common::ReactionConfig;
use confess_core::traits::{
    AggregateRepository, CategoryRepository, CommentRepository, ConfessionRepository,
    ReactionRepository, UserRepository,
};
use confess_core::SnowflakeGenerator;
use confess_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories (including the reaction ledger and the
///   aggregate counter primitive)
/// - The Redis pub/sub publisher
/// - Snowflake generator for ID generation
/// - Reaction policy configuration
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    confession_repo: Arc<dyn ConfessionRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    aggregate_repo: Arc<dyn AggregateRepository>,

    // Pub/Sub
    publisher: Publisher,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,

    // Policy
    reaction_config: ReactionConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        user_repo: Arc<dyn UserRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        confession_repo: Arc<dyn ConfessionRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        aggregate_repo: Arc<dyn AggregateRepository>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        reaction_config: ReactionConfig,
    ) -> Self {
        let publisher = Publisher::new((*redis_pool).clone());

        Self {
            pool,
            redis_pool,
            user_repo,
            category_repo,
            confession_repo,
            comment_repo,
            reaction_repo,
            aggregate_repo,
            publisher,
            snowflake_generator,
            reaction_config,
        }
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the category repository
    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    /// Get the confession repository
    pub fn confession_repo(&self) -> &dyn ConfessionRepository {
        self.confession_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the reaction ledger
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the aggregate counter primitive
    pub fn aggregate_repo(&self) -> &dyn AggregateRepository {
        self.aggregate_repo.as_ref()
    }

    // === Pub/Sub ===

    /// Get the Redis pub/sub publisher
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> confess_core::Snowflake {
        self.snowflake_generator.generate()
    }

    /// Get the reaction policy
    pub fn reaction_config(&self) -> &ReactionConfig {
        &self.reaction_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("reaction_config", &self.reaction_config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    confession_repo: Option<Arc<dyn ConfessionRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    aggregate_repo: Option<Arc<dyn AggregateRepository>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    reaction_config: Option<ReactionConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn confession_repo(mut self, repo: Arc<dyn ConfessionRepository>) -> Self {
        self.confession_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn aggregate_repo(mut self, repo: Arc<dyn AggregateRepository>) -> Self {
        self.aggregate_repo = Some(repo);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn reaction_config(mut self, config: ReactionConfig) -> Self {
        self.reaction_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.redis_pool
                .ok_or_else(|| ServiceError::validation("redis_pool is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.category_repo
                .ok_or_else(|| ServiceError::validation("category_repo is required"))?,
            self.confession_repo
                .ok_or_else(|| ServiceError::validation("confession_repo is required"))?,
            self.comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            self.reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.aggregate_repo
                .ok_or_else(|| ServiceError::validation("aggregate_repo is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            self.reaction_config.unwrap_or_default(),
        ))
    }
}
