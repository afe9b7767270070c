//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Category not found: {0}")]
    CategoryNotFound(Snowflake),

    #[error("Confession not found: {0}")]
    ConfessionNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Text too long: max {max} characters")]
    TextTooLong { max: usize },

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("An emoji is required for the first reaction")]
    EmojiRequired,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the confession author")]
    NotConfessionAuthor,

    #[error("Not the comment author")]
    NotCommentAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already taken")]
    UsernameTaken,

    #[error("Category already exists")]
    CategoryNameTaken,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::ConfessionNotFound(_) => "UNKNOWN_CONFESSION",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::TextTooLong { .. } => "TEXT_TOO_LONG",
            Self::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Self::EmojiRequired => "EMOJI_REQUIRED",

            // Authorization
            Self::NotConfessionAuthor => "NOT_CONFESSION_AUTHOR",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            // Conflict
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::CategoryNameTaken => "CATEGORY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::ConfessionNotFound(_)
                | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::TextTooLong { .. }
                | Self::InvalidCoordinates(_)
                | Self::EmojiRequired
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotConfessionAuthor | Self::NotCommentAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameTaken | Self::CategoryNameTaken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::ConfessionNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_CONFESSION");

        let err = DomainError::NotCommentAuthor;
        assert_eq!(err.code(), "NOT_COMMENT_AUTHOR");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::UserNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::CommentNotFound(Snowflake::new(1)).is_not_found());
        assert!(!DomainError::CategoryNameTaken.is_not_found());
    }

    #[test]
    fn test_authorization_distinct_from_not_found() {
        // Clients must be able to tell "doesn't exist" from "not yours"
        let missing = DomainError::CommentNotFound(Snowflake::new(9));
        let denied = DomainError::NotCommentAuthor;
        assert!(missing.is_not_found() && !missing.is_authorization());
        assert!(denied.is_authorization() && !denied.is_not_found());
    }

    #[test]
    fn test_is_validation() {
        assert!(DomainError::TextTooLong { max: 280 }.is_validation());
        assert!(DomainError::EmojiRequired.is_validation());
        assert!(!DomainError::DatabaseError("x".into()).is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::TextTooLong { max: 280 };
        assert_eq!(err.to_string(), "Text too long: max 280 characters");
    }
}
