//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Category, Comment, Confession, QuotedComment, Reaction, ReactionCount, ReactionUpdate,
    SubjectRef, User,
};
use crate::error::DomainError;
use crate::value_objects::{GeoPoint, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// 1-based page/size slicing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: i64,
    pub size: i64,
}

impl PageQuery {
    pub const DEFAULT_SIZE: i64 = 10;
    pub const MAX_SIZE: i64 = 100;

    /// Build a query, clamping page to >= 1 and size to 1..=MAX_SIZE
    #[must_use]
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, Self::MAX_SIZE),
        }
    }

    /// Row offset for this page
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.size
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// One page of results plus the unsliced total
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    /// Map the items while keeping the total
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by pseudonym
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check whether a pseudonym is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user with an optional password hash
    async fn create(&self, user: &User, password_hash: Option<&str>) -> RepoResult<()>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find category by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Category>>;

    /// Find category by its unique name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>>;

    /// Create a new category; fails with a conflict when the name is taken
    async fn create(&self, category: &Category) -> RepoResult<()>;

    /// List all categories ordered by name
    async fn list(&self) -> RepoResult<Vec<Category>>;
}

// ============================================================================
// Confession Repository
// ============================================================================

#[async_trait]
pub trait ConfessionRepository: Send + Sync {
    /// Find confession by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Confession>>;

    /// Create a new confession
    async fn create(&self, confession: &Confession) -> RepoResult<()>;

    /// Update text and/or category (author gating happens in the service)
    async fn update_content(
        &self,
        id: Snowflake,
        text: Option<&str>,
        category_id: Option<Snowflake>,
    ) -> RepoResult<()>;

    /// Delete a confession; returns false when it was already gone
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;

    /// List newest-first, optionally filtered by category
    async fn list(
        &self,
        category_id: Option<Snowflake>,
        query: PageQuery,
    ) -> RepoResult<Page<Confession>>;

    /// List a single author's confessions, newest first
    async fn list_by_author(
        &self,
        author_id: Snowflake,
        query: PageQuery,
    ) -> RepoResult<Page<Confession>>;

    /// Confessions within `max_distance_m` meters of a point, nearest first
    async fn find_nearby(
        &self,
        center: GeoPoint,
        max_distance_m: f64,
        limit: i64,
    ) -> RepoResult<Vec<Confession>>;

    /// Resolve the author's pseudonym for display
    async fn author_username(&self, author_id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Replace the text of a comment
    async fn update_text(&self, id: Snowflake, text: &str) -> RepoResult<()>;

    /// Delete a comment; returns false when it was already gone
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;

    /// Comments on a confession, newest first, with quoted-comment previews
    /// resolved where the target still exists
    async fn list_by_confession(
        &self,
        confession_id: Snowflake,
        query: PageQuery,
    ) -> RepoResult<Page<(Comment, Option<QuotedComment>)>>;
}

// ============================================================================
// Reaction Ledger
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find a user's active reaction on a subject
    async fn find(&self, subject: SubjectRef, user_id: Snowflake) -> RepoResult<Option<Reaction>>;

    /// Apply one reaction request and report the resulting transition.
    ///
    /// - No record, `emoji` absent: a record is created with
    ///   `default_emoji`, or the call fails with `EmojiRequired` when no
    ///   default is supplied.
    /// - No record, `emoji` present: record created (`added`).
    /// - Record exists, `emoji` absent: record deleted (`removed`).
    /// - Record exists, same emoji: no mutation (`unchanged`).
    /// - Record exists, different emoji: emoji replaced (`updated`).
    ///
    /// The (subject, user) uniqueness invariant is enforced here: a
    /// concurrent creator that loses the insert race must observe the
    /// winner's record and continue down the update path instead of
    /// surfacing a conflict.
    async fn upsert(
        &self,
        subject: SubjectRef,
        user_id: Snowflake,
        emoji: Option<String>,
        default_emoji: Option<&str>,
    ) -> RepoResult<ReactionUpdate>;

    /// Delete every ledger entry for a subject; returns the number purged.
    /// Purging a subject with no entries is a no-op, not an error.
    async fn purge_subject(&self, subject: SubjectRef) -> RepoResult<u64>;

    /// Recount the ledger by emoji (diagnostic read; normal reads use the
    /// denormalized map on the subject)
    async fn count_by_emoji(&self, subject: SubjectRef) -> RepoResult<Vec<ReactionCount>>;
}

// ============================================================================
// Aggregate Counters
// ============================================================================

/// Storage primitive behind the aggregate counter maintainer.
///
/// Implementations must translate every call into an atomic field update
/// executed by the storage engine. Reading a map, modifying it in
/// application code, and writing it back is not an acceptable
/// implementation: concurrent writers would lose updates.
#[async_trait]
pub trait AggregateRepository: Send + Sync {
    /// Shift the subject's emoji-count map: decrement `old_emoji` (removing
    /// the key when the count reaches zero) and increment `new_emoji`
    /// (creating the key at 1)
    async fn apply_reaction_delta(
        &self,
        subject: SubjectRef,
        old_emoji: Option<&str>,
        new_emoji: Option<&str>,
    ) -> RepoResult<()>;

    /// Increment a confession's comment counter
    async fn increment_comments(&self, confession_id: Snowflake) -> RepoResult<()>;

    /// Decrement a confession's comment counter, clamping at zero
    async fn decrement_comments(&self, confession_id: Snowflake) -> RepoResult<()>;

    /// Bump a user's lifetime post counter
    async fn record_post(&self, user_id: Snowflake) -> RepoResult<()>;

    /// Bump a user's lifetime comment counter
    async fn record_comment(&self, user_id: Snowflake) -> RepoResult<()>;
}
