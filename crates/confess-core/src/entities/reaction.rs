//! Reaction ledger types
//!
//! The ledger holds one record per (subject, user) pair and is the source
//! of truth for the denormalized emoji-count maps on confessions and
//! comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// The kind of entity a reaction attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Confession,
    Comment,
}

impl SubjectKind {
    /// Stable storage/wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confession => "confession",
            Self::Comment => "comment",
        }
    }

    /// Parse a storage value back to a kind
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confession" => Some(Self::Confession),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (kind, id) handle to a reaction subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubjectRef {
    pub kind: SubjectKind,
    pub id: Snowflake,
}

impl SubjectRef {
    #[must_use]
    pub const fn confession(id: Snowflake) -> Self {
        Self {
            kind: SubjectKind::Confession,
            id,
        }
    }

    #[must_use]
    pub const fn comment(id: Snowflake) -> Self {
        Self {
            kind: SubjectKind::Comment,
            id,
        }
    }
}

impl std::fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A single user's active reaction on a subject
///
/// At most one record exists per (subject, user); re-reacting replaces the
/// emoji in place and toggling off deletes the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub subject: SubjectRef,
    pub user_id: Snowflake,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(subject: SubjectRef, user_id: Snowflake, emoji: String) -> Self {
        Self {
            subject,
            user_id,
            emoji,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of a ledger upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionAction {
    Added,
    Updated,
    Removed,
    Unchanged,
}

impl ReactionAction {
    /// Stable wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Updated => "updated",
            Self::Removed => "removed",
            Self::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for ReactionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed ledger transition, carrying exactly the information the
/// aggregate counter needs to adjust counts once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionUpdate {
    pub action: ReactionAction,
    pub subject: SubjectRef,
    pub user_id: Snowflake,
    /// Emoji removed from the count map (present for updated/removed)
    pub old_emoji: Option<String>,
    /// Emoji added to the count map (present for added/updated)
    pub new_emoji: Option<String>,
}

impl ReactionUpdate {
    /// Whether this transition mutated the ledger at all
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        self.action != ReactionAction::Unchanged
    }

    /// The user's emoji after the transition, if any
    #[must_use]
    pub fn current_emoji(&self) -> Option<&str> {
        match self.action {
            ReactionAction::Added | ReactionAction::Updated => self.new_emoji.as_deref(),
            ReactionAction::Unchanged => self.old_emoji.as_deref(),
            ReactionAction::Removed => None,
        }
    }
}

/// Aggregated reaction count for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionCount {
    pub emoji: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_kind_roundtrip() {
        assert_eq!(SubjectKind::parse("confession"), Some(SubjectKind::Confession));
        assert_eq!(SubjectKind::parse("comment"), Some(SubjectKind::Comment));
        assert_eq!(SubjectKind::parse("post"), None);
        assert_eq!(SubjectKind::Comment.as_str(), "comment");
    }

    #[test]
    fn test_action_wire_names() {
        assert_eq!(ReactionAction::Added.as_str(), "added");
        assert_eq!(ReactionAction::Unchanged.to_string(), "unchanged");
        let json = serde_json::to_string(&ReactionAction::Removed).unwrap();
        assert_eq!(json, "\"removed\"");
    }

    #[test]
    fn test_update_mutation_flag() {
        let update = ReactionUpdate {
            action: ReactionAction::Unchanged,
            subject: SubjectRef::comment(Snowflake::new(1)),
            user_id: Snowflake::new(2),
            old_emoji: Some("👍".to_string()),
            new_emoji: None,
        };
        assert!(!update.is_mutation());
        assert_eq!(update.current_emoji(), Some("👍"));
    }

    #[test]
    fn test_update_current_emoji_after_switch() {
        let update = ReactionUpdate {
            action: ReactionAction::Updated,
            subject: SubjectRef::comment(Snowflake::new(1)),
            user_id: Snowflake::new(2),
            old_emoji: Some("👍".to_string()),
            new_emoji: Some("❤️".to_string()),
        };
        assert!(update.is_mutation());
        assert_eq!(update.current_emoji(), Some("❤️"));
    }

    #[test]
    fn test_update_removed_has_no_current_emoji() {
        let update = ReactionUpdate {
            action: ReactionAction::Removed,
            subject: SubjectRef::confession(Snowflake::new(1)),
            user_id: Snowflake::new(2),
            old_emoji: Some("😂".to_string()),
            new_emoji: None,
        };
        assert_eq!(update.current_emoji(), None);
    }
}
