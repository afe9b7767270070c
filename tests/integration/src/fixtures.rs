//! Request/response fixtures for integration tests
//!
//! Wire-shape structs; unknown response fields are ignored.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

static FIXTURE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Produce a name unlikely to collide with earlier test runs
pub fn unique_name(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let n = FIXTURE_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{prefix}-{nanos}-{n}")
}

// ============================================================================
// Identity
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub username: String,
}

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateCategoryRequest {
    pub fn unique() -> Self {
        Self {
            name: unique_name("category"),
            description: Some("integration test category".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
}

// ============================================================================
// Confessions
// ============================================================================

#[derive(Debug, Serialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Serialize)]
pub struct CreateConfessionRequest {
    pub text: String,
    pub category_id: String,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub author_id: String,
}

impl CreateConfessionRequest {
    pub fn at(category_id: &str, author_id: &str, longitude: f64, latitude: f64) -> Self {
        Self {
            text: "i still check my ex's playlists".to_string(),
            category_id: category_id.to_string(),
            location: Location {
                longitude,
                latitude,
            },
            address: None,
            author_id: author_id.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConfessionResponse {
    pub id: String,
    pub text: String,
    pub category_id: String,
    pub author_id: String,
    pub reactions: BTreeMap<String, i64>,
    pub comments_count: i64,
    #[serde(default)]
    pub my_reaction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteRequest {
    pub author_id: String,
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub confession_id: String,
    pub text: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_comment_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateCommentRequest {
    pub text: String,
    pub author_id: String,
}

#[derive(Debug, Deserialize)]
pub struct QuotedCommentResponse {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub confession_id: String,
    pub text: String,
    pub username: String,
    #[serde(default)]
    pub quoted_comment: Option<QuotedCommentResponse>,
    pub reactions: BTreeMap<String, i64>,
}

// ============================================================================
// Reactions
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ConfessionReactRequest {
    pub confession_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentReactRequest {
    pub comment_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReactionResponse {
    pub action: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub old_emoji: Option<String>,
}

// ============================================================================
// Pagination
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub items: Vec<T>,
}
