//! Category database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use confess_core::{Category, Snowflake};

/// Database model for the categories table
#[derive(Debug, Clone, FromRow)]
pub struct CategoryModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Self {
            id: Snowflake::new(model.id),
            name: model.name,
            description: model.description,
            created_at: model.created_at,
        }
    }
}
