//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{categories, comments, confessions, health, identity, reactions};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(confession_routes())
        .merge(comment_routes())
        .merge(category_routes())
}

/// Anonymous identity routes
fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/register", post(identity::register))
}

/// Confession routes
fn confession_routes() -> Router<AppState> {
    Router::new()
        .route("/confessions/create", post(confessions::create_confession))
        .route("/confessions", get(confessions::list_confessions))
        .route("/confessions/nearby", get(confessions::nearby_confessions))
        .route("/confessions/react", post(reactions::react_to_confession))
        .route(
            "/confessions/author/:author_id",
            get(confessions::list_by_author),
        )
        .route("/confessions/:id", get(confessions::get_confession))
        .route("/confessions/:id", put(confessions::update_confession))
        .route("/confessions/:id", delete(confessions::delete_confession))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments/add", post(comments::create_comment))
        .route("/comments/react", post(reactions::react_to_comment))
        .route(
            "/comments/confession/:confession_id",
            get(comments::list_comments),
        )
        .route("/comments/:id", put(comments::update_comment))
        .route("/comments/:id", delete(comments::delete_comment))
}

/// Category routes
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories/admin/create", post(categories::create_category))
        .route("/categories", get(categories::list_categories))
}
