use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use ember_shared::errors::{AppError, AppResult, ErrorCode};
use ember_shared::types::auth::AuthUser;
use ember_shared::types::ApiResponse;

use crate::events::publisher;
use crate::models::{Intent, NewProfile, Profile, UpdateProfile};
use crate::AppState;

// --- GET /me ---

pub async fn get_profile(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<Profile>>> {
    let profile = state.profiles.get(user.id)?;
    Ok(Json(ApiResponse::ok(profile)))
}

// --- POST /me ---

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub location: Option<String>,
    pub looking_for: String,
    pub voice_bio_url: Option<String>,
}

pub async fn create_profile(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProfileRequest>,
) -> AppResult<Json<ApiResponse<Profile>>> {
    let intent = Intent::from_str(&req.looking_for)
        .map_err(|_| AppError::new(ErrorCode::ValidationError, "unknown looking_for value"))?;

    let profile = state.profiles.create(NewProfile {
        user_id: user.id,
        bio: req.bio,
        interests: req.interests,
        location: req.location,
        looking_for: intent.to_string(),
        voice_bio_url: req.voice_bio_url,
    })?;

    publisher::publish_profile_created(&state.rabbitmq, profile.user_id, profile.id).await;

    Ok(Json(ApiResponse::ok(profile)))
}

// --- PATCH /me ---

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    pub interests: Option<Vec<String>>,
    pub location: Option<String>,
    pub looking_for: Option<String>,
    pub voice_bio_url: Option<String>,
}

pub async fn update_profile(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<Profile>>> {
    let looking_for = match req.looking_for {
        Some(ref raw) => Some(
            Intent::from_str(raw)
                .map_err(|_| AppError::new(ErrorCode::ValidationError, "unknown looking_for value"))?
                .to_string(),
        ),
        None => None,
    };

    let updated = state.profiles.update(
        user.id,
        UpdateProfile {
            bio: req.bio,
            interests: req.interests,
            location: req.location,
            looking_for,
            voice_bio_url: req.voice_bio_url,
        },
    )?;

    publisher::publish_profile_updated(&state.rabbitmq, updated.user_id, updated.id).await;

    Ok(Json(ApiResponse::ok(updated)))
}

// --- GET /profile/:user_id --- (public profile by user id or profile id)

pub async fn get_public_profile(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    axum::extract::Path(id): axum::extract::Path<uuid::Uuid>,
) -> AppResult<Json<ApiResponse<Profile>>> {
    let profile = state.profiles.get_public(id)?;
    Ok(Json(ApiResponse::ok(profile)))
}

// --- DELETE /me ---

#[derive(Debug, Serialize)]
pub struct ProfileRemovedResponse {
    pub removed: bool,
}

pub async fn delete_profile(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<ProfileRemovedResponse>>> {
    state.profiles.delete(user.id)?;
    Ok(Json(ApiResponse::ok(ProfileRemovedResponse { removed: true })))
}
