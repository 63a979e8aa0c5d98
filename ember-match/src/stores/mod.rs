use uuid::Uuid;

use ember_shared::errors::AppResult;

use crate::models::{Like, Match, NewLike, NewMatch, NewProfile, Profile, UpdateProfile, User};

pub mod pg;

#[cfg(test)]
pub mod memory;

/// Filters applied when loading the discovery candidate pool. Exclusion of
/// already-liked and already-matched users happens in the service layer; the
/// store only narrows on user flags and profile fields.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub exclude_user: Option<Uuid>,
    pub location: Option<String>,
    pub looking_for: Option<String>,
    pub require_verified: bool,
}

pub trait UserStore: Send + Sync {
    fn find(&self, user_id: Uuid) -> AppResult<Option<User>>;
}

pub trait ProfileStore: Send + Sync {
    fn find(&self, profile_id: Uuid) -> AppResult<Option<Profile>>;
    fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>>;
    fn find_by_users(&self, user_ids: &[Uuid]) -> AppResult<Vec<Profile>>;
    fn create(&self, profile: NewProfile) -> AppResult<Profile>;
    fn update(&self, user_id: Uuid, changes: UpdateProfile) -> AppResult<Profile>;
    fn delete_by_user(&self, user_id: Uuid) -> AppResult<bool>;
    fn candidates(&self, filter: &CandidateFilter) -> AppResult<Vec<Profile>>;
}

pub trait LikeStore: Send + Sync {
    fn find_pair(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<Option<Like>>;
    /// Insert a directed like. A concurrent duplicate surfaces as the
    /// AlreadyLiked conflict, same as the pre-check.
    fn create(&self, like: NewLike) -> AppResult<Like>;
    fn delete_pair(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<bool>;
    /// Likes sent by a user, most recent first.
    fn given(&self, liker_id: Uuid) -> AppResult<Vec<Like>>;
    /// Likes received by a user, most recent first.
    fn received(&self, liked_id: Uuid) -> AppResult<Vec<Like>>;
}

pub trait MatchStore: Send + Sync {
    fn find_active_pair(&self, user_a_id: Uuid, user_b_id: Uuid) -> AppResult<Option<Match>>;
    /// Insert the canonical pair, treating an existing row as success: an
    /// active row is returned as-is (racing mutual likes), an inactive row is
    /// reactivated with a fresh matched_at. Callers only invoke this when
    /// both directed likes exist.
    fn upsert_pair(&self, new_match: NewMatch) -> AppResult<Match>;
    fn deactivate_pair(&self, user_a_id: Uuid, user_b_id: Uuid) -> AppResult<bool>;
    /// Active matches involving a user, most recent first.
    fn active_for_user(&self, user_id: Uuid) -> AppResult<Vec<Match>>;
}
