use std::sync::Arc;

use uuid::Uuid;

use ember_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{NewProfile, Profile, UpdateProfile};
use crate::stores::{ProfileStore, UserStore};

pub const MAX_INTERESTS: usize = 20;

pub struct ProfileService {
    users: Arc<dyn UserStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { users, profiles }
    }

    pub fn get(&self, user_id: Uuid) -> AppResult<Profile> {
        self.profiles
            .find_by_user(user_id)?
            .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "profile not found"))
    }

    /// Public profile lookup; the id can be a user id or a profile id.
    pub fn get_public(&self, id: Uuid) -> AppResult<Profile> {
        if let Some(profile) = self.profiles.find_by_user(id)? {
            return Ok(profile);
        }
        self.profiles
            .find(id)?
            .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "profile not found"))
    }

    pub fn create(&self, profile: NewProfile) -> AppResult<Profile> {
        let user = self
            .users
            .find(profile.user_id)?
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound, "user not found"))?;

        if !user.is_active {
            return Err(AppError::forbidden("account is deactivated"));
        }

        check_interest_count(profile.interests.len())?;

        if self.profiles.find_by_user(profile.user_id)?.is_some() {
            return Err(AppError::new(
                ErrorCode::ProfileAlreadyExists,
                "profile already exists",
            ));
        }

        let created = self.profiles.create(profile)?;

        tracing::info!(
            profile_id = %created.id,
            user_id = %created.user_id,
            "profile created"
        );

        Ok(created)
    }

    pub fn update(&self, user_id: Uuid, changes: UpdateProfile) -> AppResult<Profile> {
        self.profiles
            .find_by_user(user_id)?
            .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "profile not found"))?;

        if let Some(ref interests) = changes.interests {
            check_interest_count(interests.len())?;
        }

        self.profiles.update(user_id, changes)
    }

    pub fn delete(&self, user_id: Uuid) -> AppResult<()> {
        if !self.profiles.delete_by_user(user_id)? {
            return Err(AppError::new(ErrorCode::ProfileNotFound, "profile not found"));
        }
        Ok(())
    }
}

fn check_interest_count(count: usize) -> AppResult<()> {
    if count > MAX_INTERESTS {
        return Err(AppError::new(
            ErrorCode::TooManyInterests,
            format!("at most {MAX_INTERESTS} interests allowed"),
        ));
    }
    Ok(())
}
