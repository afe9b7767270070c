//! Category handlers

use axum::{extract::State, Json};
use confess_service::{CategoryResponse, CategoryService, CreateCategoryRequest};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a category
///
/// POST /api/categories/admin/create
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> ApiResult<Created<Json<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    let response = service.create_category(request).await?;
    Ok(Created(Json(response)))
}

/// List all categories ordered by name
///
/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}
