//! Category entity - a named confession feed and broadcast topic key

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Confession category
///
/// Names are unique. The category id doubles as the topic key for
/// `confessionAdded` broadcasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new Category
    pub fn new(id: Snowflake, name: String, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description,
            created_at: Utc::now(),
        }
    }
}
