//! Response DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use confess_core::{
    Category, Comment, Confession, QuotedComment, ReactionAction, ReactionUpdate, Snowflake,
    SubjectKind,
};

/// Response for anonymous registration
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub user_id: Snowflake,
    pub username: String,
}

/// Category response
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: Snowflake,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at,
        }
    }
}

/// Confession response
///
/// `author_username` is resolved at read time; `my_reaction` is present
/// only when the caller identified itself for enrichment.
#[derive(Debug, Clone, Serialize)]
pub struct ConfessionResponse {
    pub id: Snowflake,
    pub text: String,
    pub location: confess_core::GeoPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub category_id: Snowflake,
    pub author_id: Snowflake,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_username: Option<String>,
    pub reactions: BTreeMap<String, i64>,
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_reaction: Option<String>,
}

impl ConfessionResponse {
    /// Build from an entity plus read-time enrichment
    pub fn from_entity(
        confession: Confession,
        author_username: Option<String>,
        my_reaction: Option<String>,
    ) -> Self {
        Self {
            id: confession.id,
            text: confession.text,
            location: confession.location,
            address: confession.address,
            category_id: confession.category_id,
            author_id: confession.author_id,
            author_username,
            reactions: confession.reactions,
            comments_count: confession.comments_count,
            created_at: confession.created_at,
            edited_at: confession.edited_at,
            my_reaction,
        }
    }
}

impl From<Confession> for ConfessionResponse {
    fn from(confession: Confession) -> Self {
        Self::from_entity(confession, None, None)
    }
}

/// Quoted-comment preview inside a comment response
#[derive(Debug, Clone, Serialize)]
pub struct QuotedCommentResponse {
    pub id: Snowflake,
    pub text: String,
    pub username: String,
}

impl From<QuotedComment> for QuotedCommentResponse {
    fn from(quoted: QuotedComment) -> Self {
        Self {
            id: quoted.id,
            text: quoted.text,
            username: quoted.username,
        }
    }
}

/// Comment response
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Snowflake,
    pub confession_id: Snowflake,
    pub text: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Snowflake>,
    /// Omitted when no quote was recorded or the quoted comment is gone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_comment: Option<QuotedCommentResponse>,
    pub reactions: BTreeMap<String, i64>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

impl CommentResponse {
    /// Build from an entity plus its resolved quote
    pub fn from_entity(comment: Comment, quoted: Option<QuotedComment>) -> Self {
        Self {
            id: comment.id,
            confession_id: comment.confession_id,
            text: comment.text,
            username: comment.username,
            author_id: comment.author_id,
            quoted_comment: quoted.map(QuotedCommentResponse::from),
            reactions: comment.reactions,
            created_at: comment.created_at,
            edited_at: comment.edited_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from_entity(comment, None)
    }
}

/// Outcome of a reaction upsert
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub action: ReactionAction,
    pub subject_kind: SubjectKind,
    pub subject_id: Snowflake,
    pub user_id: Snowflake,
    /// The caller's emoji after the operation (absent when removed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_emoji: Option<String>,
}

impl From<ReactionUpdate> for ReactionResponse {
    fn from(update: ReactionUpdate) -> Self {
        let emoji = update.current_emoji().map(String::from);
        Self {
            action: update.action,
            subject_kind: update.subject.kind,
            subject_id: update.subject.id,
            user_id: update.user_id,
            emoji,
            old_emoji: update.old_emoji,
        }
    }
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response with dependency health
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
    pub redis: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool, redis: bool) -> Self {
        Self {
            status: if database && redis { "ready" } else { "degraded" },
            database,
            redis,
        }
    }
}

/// One page of results with the unsliced total
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub items: Vec<T>,
}

impl<T> Paginated<T> {
    /// Wrap a repository page with its query parameters
    pub fn new(page: confess_core::Page<T>, query: confess_core::PageQuery) -> Self {
        Self {
            total: page.total,
            page: query.page,
            size: query.size,
            items: page.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confess_core::{Page, PageQuery, SubjectRef};

    #[test]
    fn test_paginated_wrapping() {
        let page = Page {
            items: vec!["a", "b"],
            total: 25,
        };
        let out = Paginated::new(page, PageQuery::new(2, 10));
        assert_eq!(out.total, 25);
        assert_eq!(out.page, 2);
        assert_eq!(out.size, 10);
        assert_eq!(out.items.len(), 2);
    }

    #[test]
    fn test_reaction_response_from_update() {
        let update = ReactionUpdate {
            action: ReactionAction::Updated,
            subject: SubjectRef::comment(Snowflake::new(5)),
            user_id: Snowflake::new(7),
            old_emoji: Some("👍".to_string()),
            new_emoji: Some("❤️".to_string()),
        };
        let response = ReactionResponse::from(update);
        assert_eq!(response.action, ReactionAction::Updated);
        assert_eq!(response.subject_kind, SubjectKind::Comment);
        assert_eq!(response.emoji.as_deref(), Some("❤️"));
        assert_eq!(response.old_emoji.as_deref(), Some("👍"));
    }

    #[test]
    fn test_removed_reaction_serializes_without_emoji() {
        let update = ReactionUpdate {
            action: ReactionAction::Removed,
            subject: SubjectRef::confession(Snowflake::new(5)),
            user_id: Snowflake::new(7),
            old_emoji: Some("😢".to_string()),
            new_emoji: None,
        };
        let json = serde_json::to_value(ReactionResponse::from(update)).unwrap();
        assert_eq!(json["action"], "removed");
        assert!(json.get("emoji").is_none());
        assert_eq!(json["old_emoji"], "😢");
    }
}
