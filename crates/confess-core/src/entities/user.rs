//! User entity - an anonymous account identified only by its pseudonym

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Anonymous user account
///
/// There is no profile beyond the generated pseudonym. The password is
/// optional and stored separately from the entity as a hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub blocked: bool,
    pub total_posts: i64,
    pub total_comments: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with zeroed counters
    pub fn new(id: Snowflake, username: String) -> Self {
        Self {
            id,
            username,
            blocked: false,
            total_posts: 0,
            total_comments: 0,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(Snowflake::new(1), "CrimsonOtter731".to_string());
        assert_eq!(user.username, "CrimsonOtter731");
        assert!(!user.blocked);
        assert_eq!(user.total_posts, 0);
        assert_eq!(user.total_comments, 0);
    }
}
