//! Request DTOs with validation rules

use confess_core::{GeoPoint, Snowflake};
use serde::Deserialize;
use validator::Validate;

/// Register an anonymous account; the password only lets the client
/// reclaim the pseudonym later
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 6, max = 128))]
    pub password: Option<String>,
}

/// Create a confession category
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(max = 280))]
    pub description: Option<String>,
}

/// Create a confession
#[derive(Debug, Deserialize, Validate)]
pub struct CreateConfessionRequest {
    #[validate(length(min = 1, max = 280))]
    pub text: String,
    pub category_id: Snowflake,
    pub location: GeoPoint,
    #[validate(length(max = 280))]
    pub address: Option<String>,
    pub author_id: Snowflake,
}

/// Update a confession (author only)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateConfessionRequest {
    #[validate(length(min = 1, max = 280))]
    pub text: Option<String>,
    pub category_id: Option<Snowflake>,
    pub author_id: Snowflake,
}

/// Author-gated delete (confession or comment)
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub author_id: Snowflake,
}

/// React to a confession; absent emoji toggles the reaction off (or picks
/// the configured default on a first reaction)
#[derive(Debug, Deserialize, Validate)]
pub struct ConfessionReactRequest {
    pub confession_id: Snowflake,
    pub user_id: Snowflake,
    #[validate(length(min = 1, max = 64))]
    pub emoji: Option<String>,
}

/// React to a comment
#[derive(Debug, Deserialize, Validate)]
pub struct CommentReactRequest {
    pub comment_id: Snowflake,
    pub user_id: Snowflake,
    #[validate(length(min = 1, max = 64))]
    pub emoji: Option<String>,
}

/// Add a comment to a confession
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub confession_id: Snowflake,
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    pub author_id: Option<Snowflake>,
    /// Weak reference; not checked for existence at write time
    pub quoted_comment_id: Option<Snowflake>,
}

/// Edit a comment's text (author only)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    pub author_id: Snowflake,
}

#[cfg(test)]
mod tests {
    use super::*;
    use confess_core::MAX_TEXT_LEN;

    #[test]
    fn test_confession_text_bounds() {
        let valid = CreateConfessionRequest {
            text: "ok".to_string(),
            category_id: Snowflake::new(1),
            location: GeoPoint::new(0.0, 0.0),
            address: None,
            author_id: Snowflake::new(2),
        };
        assert!(valid.validate().is_ok());

        let empty = CreateConfessionRequest {
            text: String::new(),
            ..valid_request()
        };
        assert!(empty.validate().is_err());

        let too_long = CreateConfessionRequest {
            text: "a".repeat(MAX_TEXT_LEN + 1),
            ..valid_request()
        };
        assert!(too_long.validate().is_err());
    }

    fn valid_request() -> CreateConfessionRequest {
        CreateConfessionRequest {
            text: "ok".to_string(),
            category_id: Snowflake::new(1),
            location: GeoPoint::new(0.0, 0.0),
            address: None,
            author_id: Snowflake::new(2),
        }
    }

    #[test]
    fn test_react_request_allows_absent_emoji() {
        let req = CommentReactRequest {
            comment_id: Snowflake::new(1),
            user_id: Snowflake::new(2),
            emoji: None,
        };
        assert!(req.validate().is_ok());

        let req = CommentReactRequest {
            comment_id: Snowflake::new(1),
            user_id: Snowflake::new(2),
            emoji: Some(String::new()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_password_bounds() {
        assert!(RegisterRequest { password: None }.validate().is_ok());
        assert!(RegisterRequest {
            password: Some("secret-enough".to_string())
        }
        .validate()
        .is_ok());
        assert!(RegisterRequest {
            password: Some("shrt".to_string())
        }
        .validate()
        .is_err());
    }
}
