//! Confession handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use confess_service::{
    ConfessionResponse, ConfessionService, CreateConfessionRequest, DeleteRequest, Paginated,
    UpdateConfessionRequest,
};
use serde::Deserialize;

use crate::extractors::{PageParams, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Query filter for listing confessions
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category_id: Option<String>,
}

/// Viewer enrichment for single-confession reads
#[derive(Debug, Deserialize)]
pub struct ViewerQuery {
    pub user_id: Option<String>,
}

/// Nearby query parameters (distance in meters)
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub longitude: f64,
    pub latitude: f64,
    pub max_distance: Option<f64>,
}

/// Create a confession
///
/// POST /api/confessions/create
pub async fn create_confession(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateConfessionRequest>,
) -> ApiResult<Created<Json<ConfessionResponse>>> {
    let service = ConfessionService::new(state.service_context());
    let response = service.create_confession(request).await?;
    Ok(Created(Json(response)))
}

/// List confessions newest first, optionally filtered by category
///
/// GET /api/confessions
pub async fn list_confessions(
    State(state): State<AppState>,
    Query(filter): Query<ListQuery>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Paginated<ConfessionResponse>>> {
    let category_id = filter
        .category_id
        .map(|s| {
            s.parse()
                .map_err(|_| ApiError::invalid_query("Invalid category_id format"))
        })
        .transpose()?;

    let service = ConfessionService::new(state.service_context());
    let response = service.list_confessions(category_id, page).await?;
    Ok(Json(response))
}

/// Confessions near a point
///
/// GET /api/confessions/nearby
pub async fn nearby_confessions(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> ApiResult<Json<Vec<ConfessionResponse>>> {
    let service = ConfessionService::new(state.service_context());
    let confessions = service
        .nearby_confessions(query.longitude, query.latitude, query.max_distance)
        .await?;
    Ok(Json(confessions))
}

/// Get one confession, optionally enriched with the viewer's reaction
///
/// GET /api/confessions/{id}
pub async fn get_confession(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(viewer): Query<ViewerQuery>,
) -> ApiResult<Json<ConfessionResponse>> {
    let confession_id = id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid confession id format"))?;
    let viewer_id = viewer
        .user_id
        .map(|s| {
            s.parse()
                .map_err(|_| ApiError::invalid_query("Invalid user_id format"))
        })
        .transpose()?;

    let service = ConfessionService::new(state.service_context());
    let response = service.get_confession(confession_id, viewer_id).await?;
    Ok(Json(response))
}

/// List one author's confessions
///
/// GET /api/confessions/author/{author_id}
pub async fn list_by_author(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Paginated<ConfessionResponse>>> {
    let author_id = author_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid author id format"))?;

    let service = ConfessionService::new(state.service_context());
    let response = service.list_by_author(author_id, page).await?;
    Ok(Json(response))
}

/// Update a confession (author only)
///
/// PUT /api/confessions/{id}
pub async fn update_confession(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateConfessionRequest>,
) -> ApiResult<Json<ConfessionResponse>> {
    let confession_id = id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid confession id format"))?;

    let service = ConfessionService::new(state.service_context());
    let response = service.update_confession(confession_id, request).await?;
    Ok(Json(response))
}

/// Delete a confession (author only)
///
/// DELETE /api/confessions/{id}
pub async fn delete_confession(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<DeleteRequest>,
) -> ApiResult<NoContent> {
    let confession_id = id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid confession id format"))?;

    let service = ConfessionService::new(state.service_context());
    service
        .delete_confession(confession_id, request.author_id)
        .await?;
    Ok(NoContent)
}
