//! Handler error types

use crate::protocol::CloseCode;
use thiserror::Error;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Invalid payload received
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Topic join refused by policy
    #[error("Topic denied: {0}")]
    TopicDenied(String),

    /// Cache error
    #[error("Cache error: {0}")]
    CacheError(#[from] confess_cache::SubscriberError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Convert to a close code (if applicable)
    pub fn to_close_code(&self) -> Option<CloseCode> {
        match self {
            Self::InvalidPayload(_) => Some(CloseCode::DecodeError),
            Self::TopicDenied(_) => Some(CloseCode::TopicDenied),
            Self::CacheError(_) => Some(CloseCode::UnknownError),
            Self::Internal(_) => Some(CloseCode::UnknownError),
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
