//! Comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use confess_core::{Comment, QuotedComment, Snowflake};

use super::decode_reactions;

/// Database model for the comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub confession_id: i64,
    pub text: String,
    pub username: String,
    pub author_id: Option<i64>,
    pub quoted_comment_id: Option<i64>,
    pub reactions: serde_json::Value,
    pub is_reported: bool,
    pub report_count: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Self {
            id: Snowflake::new(model.id),
            confession_id: Snowflake::new(model.confession_id),
            text: model.text,
            username: model.username,
            author_id: model.author_id.map(Snowflake::new),
            quoted_comment_id: model.quoted_comment_id.map(Snowflake::new),
            reactions: decode_reactions(model.reactions),
            is_reported: model.is_reported,
            report_count: model.report_count,
            created_at: model.created_at,
            edited_at: model.edited_at,
        }
    }
}

/// Comment row joined with its quoted comment, where that still exists.
///
/// The quote reference is weak; the joined columns are NULL both when no
/// quote was recorded and when the quoted comment has been deleted.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithQuoteModel {
    pub id: i64,
    pub confession_id: i64,
    pub text: String,
    pub username: String,
    pub author_id: Option<i64>,
    pub quoted_comment_id: Option<i64>,
    pub reactions: serde_json::Value,
    pub is_reported: bool,
    pub report_count: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub quoted_text: Option<String>,
    pub quoted_username: Option<String>,
}

impl CommentWithQuoteModel {
    /// Split into the comment and the resolved quote preview
    pub fn into_parts(self) -> (Comment, Option<QuotedComment>) {
        let quoted = match (self.quoted_comment_id, &self.quoted_text, &self.quoted_username) {
            (Some(id), Some(text), Some(username)) => Some(QuotedComment {
                id: Snowflake::new(id),
                text: text.clone(),
                username: username.clone(),
            }),
            _ => None,
        };

        let comment = Comment {
            id: Snowflake::new(self.id),
            confession_id: Snowflake::new(self.confession_id),
            text: self.text,
            username: self.username,
            author_id: self.author_id.map(Snowflake::new),
            quoted_comment_id: self.quoted_comment_id.map(Snowflake::new),
            reactions: decode_reactions(self.reactions),
            is_reported: self.is_reported,
            report_count: self.report_count,
            created_at: self.created_at,
            edited_at: self.edited_at,
        };

        (comment, quoted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(quoted_comment_id: Option<i64>, quoted_text: Option<&str>) -> CommentWithQuoteModel {
        CommentWithQuoteModel {
            id: 1,
            confession_id: 2,
            text: "same here".to_string(),
            username: "JadeWren512".to_string(),
            author_id: Some(3),
            quoted_comment_id,
            reactions: json!({}),
            is_reported: false,
            report_count: 0,
            created_at: Utc::now(),
            edited_at: None,
            quoted_text: quoted_text.map(String::from),
            quoted_username: quoted_text.map(|_| "RubyLynx107".to_string()),
        }
    }

    #[test]
    fn test_resolved_quote() {
        let (comment, quoted) = row(Some(9), Some("original")).into_parts();
        assert_eq!(comment.quoted_comment_id, Some(Snowflake::new(9)));
        let quoted = quoted.unwrap();
        assert_eq!(quoted.id, Snowflake::new(9));
        assert_eq!(quoted.text, "original");
    }

    #[test]
    fn test_dangling_quote_is_omitted() {
        // Reference recorded but the quoted comment is gone
        let (comment, quoted) = row(Some(9), None).into_parts();
        assert_eq!(comment.quoted_comment_id, Some(Snowflake::new(9)));
        assert!(quoted.is_none());
    }

    #[test]
    fn test_no_quote() {
        let (_, quoted) = row(None, None).into_parts();
        assert!(quoted.is_none());
    }
}
