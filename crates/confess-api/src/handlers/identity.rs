//! Anonymous identity handlers

use axum::{extract::State, Json};
use confess_service::{IdentityService, RegisterRequest, RegisterResponse};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register an anonymous account with a generated pseudonym
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<RegisterResponse>>> {
    let service = IdentityService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}
