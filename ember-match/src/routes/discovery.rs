use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use ember_shared::errors::{AppError, AppResult, ErrorCode};
use ember_shared::types::auth::AuthUser;
use ember_shared::types::pagination::{Paginated, PaginationParams};
use ember_shared::types::ApiResponse;

use crate::models::Intent;
use crate::services::discovery_service::{DiscoveryFilters, ScoredProfile};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DiscoverParams {
    pub location: Option<String>,
    pub intent: Option<String>,
    pub min_common_interests: Option<usize>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 { 1 }
fn default_per_page() -> u64 { 20 }

impl DiscoverParams {
    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// GET /profiles/discover?location=&intent=&min_common_interests=&page=&per_page=
pub async fn discover_profiles(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Query(params): Query<DiscoverParams>,
) -> AppResult<Json<ApiResponse<Paginated<ScoredProfile>>>> {
    let intent = match params.intent {
        Some(ref raw) => Some(
            Intent::from_str(raw)
                .map_err(|_| AppError::new(ErrorCode::ValidationError, "unknown intent value"))?,
        ),
        None => None,
    };

    let filters = DiscoveryFilters {
        location: params.location.clone(),
        intent,
        min_common_interests: params.min_common_interests,
    };

    let feed = state.discovery.discover(user.id, &filters, &params.pagination())?;

    Ok(Json(ApiResponse::ok(feed)))
}
