//! Broadcast topic definitions.
//!
//! Defines the topic naming conventions shared by the publisher, the
//! subscriber, and the gateway's join requests. Three scoped families
//! plus one global feed:
//!
//! - `category:<id>` - new confessions in one category
//! - `confession:<id>` - comments on one confession
//! - `reaction-<id>` - reaction changes on one comment
//! - `confessions` - every new confession, regardless of category

use confess_core::Snowflake;

/// Topic prefix for category feeds
pub const CATEGORY_TOPIC_PREFIX: &str = "category:";
/// Topic prefix for single-confession comment feeds
pub const CONFESSION_TOPIC_PREFIX: &str = "confession:";
/// Topic prefix for single-comment reaction feeds
pub const REACTION_TOPIC_PREFIX: &str = "reaction-";
/// Global topic receiving every new confession
pub const ALL_CONFESSIONS_TOPIC: &str = "confessions";

/// Broadcast topic
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// New confessions in a specific category
    Category(Snowflake),
    /// Comments on a specific confession
    Confession(Snowflake),
    /// Reaction changes on a specific comment
    Reaction(Snowflake),
    /// Every new confession
    AllConfessions,
    /// Unrecognized topic name (kept verbatim)
    Custom(String),
}

impl Topic {
    /// Create a category topic
    #[must_use]
    pub fn category(category_id: Snowflake) -> Self {
        Self::Category(category_id)
    }

    /// Create a confession topic
    #[must_use]
    pub fn confession(confession_id: Snowflake) -> Self {
        Self::Confession(confession_id)
    }

    /// Create a comment-reaction topic
    #[must_use]
    pub fn reaction(comment_id: Snowflake) -> Self {
        Self::Reaction(comment_id)
    }

    /// Create the global confession feed topic
    #[must_use]
    pub fn all_confessions() -> Self {
        Self::AllConfessions
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Category(id) => format!("{CATEGORY_TOPIC_PREFIX}{id}"),
            Self::Confession(id) => format!("{CONFESSION_TOPIC_PREFIX}{id}"),
            Self::Reaction(id) => format!("{REACTION_TOPIC_PREFIX}{id}"),
            Self::AllConfessions => ALL_CONFESSIONS_TOPIC.to_string(),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a topic name back to a `Topic`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == ALL_CONFESSIONS_TOPIC {
            return Self::AllConfessions;
        }

        if let Some(id_str) = name.strip_prefix(CATEGORY_TOPIC_PREFIX) {
            if let Ok(id) = id_str.parse::<i64>() {
                return Self::Category(Snowflake::from(id));
            }
        }

        if let Some(id_str) = name.strip_prefix(CONFESSION_TOPIC_PREFIX) {
            if let Ok(id) = id_str.parse::<i64>() {
                return Self::Confession(Snowflake::from(id));
            }
        }

        if let Some(id_str) = name.strip_prefix(REACTION_TOPIC_PREFIX) {
            if let Ok(id) = id_str.parse::<i64>() {
                return Self::Reaction(Snowflake::from(id));
            }
        }

        Self::Custom(name.to_string())
    }

    /// Whether this is one of the recognized topic families
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
