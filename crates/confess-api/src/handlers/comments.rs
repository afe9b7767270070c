//! Comment handlers

use axum::{
    extract::{Path, State},
    Json,
};
use confess_service::{
    CommentResponse, CommentService, CreateCommentRequest, DeleteRequest, Paginated,
    UpdateCommentRequest,
};

use crate::extractors::{PageParams, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Add a comment to a confession
///
/// POST /api/comments/add
pub async fn create_comment(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service.create_comment(request).await?;
    Ok(Created(Json(response)))
}

/// Edit a comment's text (author only)
///
/// PUT /api/comments/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let comment_id = id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid comment id format"))?;

    let service = CommentService::new(state.service_context());
    let response = service.update_comment(comment_id, request).await?;
    Ok(Json(response))
}

/// Delete a comment (author only)
///
/// DELETE /api/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<DeleteRequest>,
) -> ApiResult<NoContent> {
    let comment_id = id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid comment id format"))?;

    let service = CommentService::new(state.service_context());
    service.delete_comment(comment_id, request.author_id).await?;
    Ok(NoContent)
}

/// List comments on a confession, newest first
///
/// GET /api/comments/confession/{confession_id}
pub async fn list_comments(
    State(state): State<AppState>,
    Path(confession_id): Path<String>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Paginated<CommentResponse>>> {
    let confession_id = confession_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid confession id format"))?;

    let service = CommentService::new(state.service_context());
    let response = service.list_comments(confession_id, page).await?;
    Ok(Json(response))
}
