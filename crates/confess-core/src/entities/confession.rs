//! Confession entity - a short geotagged anonymous post

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::value_objects::{GeoPoint, Snowflake};

/// Maximum confession text length in characters
pub const MAX_TEXT_LEN: usize = 280;

/// Confession entity
///
/// `reactions` and `comments_count` are denormalized aggregates. They are
/// written only through the aggregate counter path, never by ordinary
/// entity updates, so they stay consistent with the reaction ledger and
/// the comment rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Confession {
    pub id: Snowflake,
    pub text: String,
    pub location: GeoPoint,
    pub address: Option<String>,
    pub category_id: Snowflake,
    pub author_id: Snowflake,
    /// Emoji -> count. Keys with a count of zero are removed, not stored.
    pub reactions: BTreeMap<String, i64>,
    pub comments_count: i64,
    pub is_reported: bool,
    pub report_count: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl Confession {
    /// Validate the text bound (non-empty, at most [`MAX_TEXT_LEN`] chars)
    #[must_use]
    pub fn text_is_valid(text: &str) -> bool {
        let len = text.chars().count();
        len > 0 && len <= MAX_TEXT_LEN
    }

    /// Total number of active reactions across all emoji
    #[must_use]
    pub fn reaction_total(&self) -> i64 {
        self.reactions.values().sum()
    }
}
