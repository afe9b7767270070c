//! Comment entity - a reply on a confession, with optional quoting

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Comment entity
///
/// `quoted_comment_id` is a weak reference: it is never validated at write
/// time and the quoted comment may be deleted later. Readers resolve it
/// lazily and drop the quote when the target is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Snowflake,
    pub confession_id: Snowflake,
    pub text: String,
    pub username: String,
    pub author_id: Option<Snowflake>,
    pub quoted_comment_id: Option<Snowflake>,
    /// Emoji -> count. Keys with a count of zero are removed, not stored.
    pub reactions: BTreeMap<String, i64>,
    pub is_reported: bool,
    pub report_count: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Whether the given caller may edit or delete this comment
    ///
    /// Comments without a recorded author can never be modified.
    #[must_use]
    pub fn is_authored_by(&self, caller: Snowflake) -> bool {
        self.author_id == Some(caller)
    }
}

/// Read-time preview of a quoted comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedComment {
    pub id: Snowflake,
    pub text: String,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(author_id: Option<Snowflake>) -> Comment {
        Comment {
            id: Snowflake::new(1),
            confession_id: Snowflake::new(2),
            text: "same".to_string(),
            username: "AmberFox204".to_string(),
            author_id,
            quoted_comment_id: None,
            reactions: BTreeMap::new(),
            is_reported: false,
            report_count: 0,
            created_at: Utc::now(),
            edited_at: None,
        }
    }

    #[test]
    fn test_author_gate() {
        let c = comment(Some(Snowflake::new(7)));
        assert!(c.is_authored_by(Snowflake::new(7)));
        assert!(!c.is_authored_by(Snowflake::new(8)));
    }

    #[test]
    fn test_authorless_comment_is_never_editable() {
        let c = comment(None);
        assert!(!c.is_authored_by(Snowflake::new(7)));
    }
}
