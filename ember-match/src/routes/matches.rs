use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use ember_shared::errors::AppResult;
use ember_shared::types::auth::AuthUser;
use ember_shared::types::ApiResponse;

use crate::services::match_service::MatchSummary;
use crate::AppState;

/// GET /matches
pub async fn list_matches(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<Vec<MatchSummary>>>> {
    let matches = state.matching.matches_for(user.id)?;
    Ok(Json(ApiResponse::ok(matches)))
}
