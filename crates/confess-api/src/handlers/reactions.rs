//! Reaction handlers
//!
//! One endpoint per subject kind. Absent emoji means toggle-off for an
//! existing reaction, or the configured default on a first reaction.

use axum::{extract::State, Json};
use confess_service::{
    CommentReactRequest, ConfessionReactRequest, ReactionResponse, ReactionService,
};

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Add, switch, or remove a reaction on a confession
///
/// POST /api/confessions/react
pub async fn react_to_confession(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ConfessionReactRequest>,
) -> ApiResult<Json<ReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let response = service
        .react_to_confession(request.confession_id, request.user_id, request.emoji)
        .await?;
    Ok(Json(response))
}

/// Add, switch, or remove a reaction on a comment
///
/// POST /api/comments/react
pub async fn react_to_comment(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CommentReactRequest>,
) -> ApiResult<Json<ReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let response = service
        .react_to_comment(request.comment_id, request.user_id, request.emoji)
        .await?;
    Ok(Json(response))
}
