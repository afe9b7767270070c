//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use confess_core::{Snowflake, User};

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub blocked: bool,
    pub total_posts: i64,
    pub total_comments: i64,
    pub created_at: DateTime<Utc>,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        Self {
            id: Snowflake::new(model.id),
            username: model.username,
            blocked: model.blocked,
            total_posts: model.total_posts,
            total_comments: model.total_comments,
            created_at: model.created_at,
        }
    }
}
