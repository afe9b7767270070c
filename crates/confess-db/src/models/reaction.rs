//! Reaction ledger database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use confess_core::{Reaction, Snowflake, SubjectKind, SubjectRef};

/// Database model for the reactions table
///
/// UNIQUE(subject_kind, subject_id, user_id) backs the one-reaction-per-
/// user-per-subject invariant.
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub subject_kind: String,
    pub subject_id: i64,
    pub user_id: i64,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        let kind = SubjectKind::parse(&model.subject_kind).unwrap_or(SubjectKind::Confession);
        Self {
            subject: SubjectRef {
                kind,
                id: Snowflake::new(model.subject_id),
            },
            user_id: Snowflake::new(model.user_id),
            emoji: model.emoji,
            created_at: model.created_at,
        }
    }
}

/// Aggregated reaction count (from query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub emoji: String,
    pub count: i64,
}
