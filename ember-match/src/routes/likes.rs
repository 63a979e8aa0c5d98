use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use ember_shared::errors::AppResult;
use ember_shared::types::auth::AuthUser;
use ember_shared::types::ApiResponse;

use crate::events::publisher;
use crate::models::{Match, Profile};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub is_match: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<Uuid>,
}

/// POST /profile/:user_id/like
pub async fn send_like(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(target_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<LikeResponse>>> {
    let outcome = state.matching.like(user.id, target_id)?;

    publisher::publish_like_sent(&state.rabbitmq, user.id, target_id).await;
    if let Some(match_id) = outcome.match_id {
        let (user_a_id, user_b_id) = Match::canonical_pair(user.id, target_id);
        publisher::publish_match_created(&state.rabbitmq, match_id, user_a_id, user_b_id).await;
    }

    Ok(Json(ApiResponse::ok(LikeResponse {
        is_match: outcome.is_match,
        match_id: outcome.match_id,
    })))
}

#[derive(Debug, Serialize)]
pub struct LikeRemovedResponse {
    pub removed: bool,
}

/// DELETE /profile/:user_id/like
pub async fn remove_like(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(target_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<LikeRemovedResponse>>> {
    let dissolved = state.matching.unlike(user.id, target_id)?;

    publisher::publish_like_removed(&state.rabbitmq, user.id, target_id).await;
    if let Some(m) = dissolved {
        publisher::publish_match_dissolved(&state.rabbitmq, m.id, m.user_a_id, m.user_b_id).await;
    }

    Ok(Json(ApiResponse::ok(LikeRemovedResponse { removed: true })))
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LikeKind {
    #[default]
    Given,
    Received,
}

#[derive(Debug, Deserialize)]
pub struct ListLikesParams {
    #[serde(rename = "type", default)]
    pub kind: LikeKind,
}

/// GET /likes?type=given|received
pub async fn list_likes(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListLikesParams>,
) -> AppResult<Json<ApiResponse<Vec<Profile>>>> {
    let profiles = match params.kind {
        LikeKind::Given => state.matching.likes_given(user.id)?,
        LikeKind::Received => state.matching.likes_received(user.id)?,
    };

    Ok(Json(ApiResponse::ok(profiles)))
}
