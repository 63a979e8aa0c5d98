//! In-memory store used by service tests in place of Postgres.

use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use ember_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{Intent, Like, Match, NewLike, NewMatch, NewProfile, Profile, UpdateProfile, User};

use super::{CandidateFilter, LikeStore, MatchStore, ProfileStore, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    profiles: Mutex<Vec<Profile>>,
    likes: Mutex<Vec<Like>>,
    matches: Mutex<Vec<Match>>,
}

impl MemoryStore {
    pub fn add_user(&self, is_active: bool, is_verified: bool) -> User {
        let id = Uuid::new_v4();
        let user = User {
            id,
            email: format!("{id}@example.test"),
            is_active,
            is_verified,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn add_profile(
        &self,
        user_id: Uuid,
        interests: &[&str],
        location: Option<&str>,
        intent: Intent,
    ) -> Profile {
        let now = Utc::now();
        let profile = Profile {
            id: Uuid::new_v4(),
            user_id,
            bio: None,
            interests: interests.iter().map(|s| s.to_string()).collect(),
            location: location.map(|s| s.to_string()),
            looking_for: intent.to_string(),
            voice_bio_url: None,
            created_at: now,
            updated_at: now,
        };
        self.profiles.lock().unwrap().push(profile.clone());
        profile
    }

    /// Verified active user with a profile, the common test fixture.
    pub fn seed_member(
        &self,
        interests: &[&str],
        location: Option<&str>,
        intent: Intent,
    ) -> Uuid {
        let user = self.add_user(true, true);
        self.add_profile(user.id, interests, location, intent);
        user.id
    }
}

impl UserStore for MemoryStore {
    fn find(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }
}

impl ProfileStore for MemoryStore {
    fn find(&self, profile_id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == profile_id)
            .cloned())
    }

    fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    fn find_by_users(&self, user_ids: &[Uuid]) -> AppResult<Vec<Profile>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| user_ids.contains(&p.user_id))
            .cloned()
            .collect())
    }

    fn create(&self, profile: NewProfile) -> AppResult<Profile> {
        let mut rows = self.profiles.lock().unwrap();
        if rows.iter().any(|p| p.user_id == profile.user_id) {
            return Err(AppError::new(
                ErrorCode::ProfileAlreadyExists,
                "profile already exists",
            ));
        }
        let now = Utc::now();
        let created = Profile {
            id: Uuid::new_v4(),
            user_id: profile.user_id,
            bio: profile.bio,
            interests: profile.interests,
            location: profile.location,
            looking_for: profile.looking_for,
            voice_bio_url: profile.voice_bio_url,
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }

    fn update(&self, user_id: Uuid, changes: UpdateProfile) -> AppResult<Profile> {
        let mut rows = self.profiles.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "profile not found"))?;

        if let Some(bio) = changes.bio {
            row.bio = Some(bio);
        }
        if let Some(interests) = changes.interests {
            row.interests = interests;
        }
        if let Some(location) = changes.location {
            row.location = Some(location);
        }
        if let Some(looking_for) = changes.looking_for {
            row.looking_for = looking_for;
        }
        if let Some(voice_bio_url) = changes.voice_bio_url {
            row.voice_bio_url = Some(voice_bio_url);
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    fn delete_by_user(&self, user_id: Uuid) -> AppResult<bool> {
        let mut rows = self.profiles.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.user_id != user_id);
        Ok(rows.len() < before)
    }

    fn candidates(&self, filter: &CandidateFilter) -> AppResult<Vec<Profile>> {
        let users = self.users.lock().unwrap();
        let rows = self.profiles.lock().unwrap();

        let matching = rows
            .iter()
            .filter(|p| Some(p.user_id) != filter.exclude_user)
            .filter(|p| {
                users
                    .iter()
                    .find(|u| u.id == p.user_id)
                    .map(|u| u.is_active && (!filter.require_verified || u.is_verified))
                    .unwrap_or(false)
            })
            .filter(|p| match filter.location {
                Some(ref loc) => p.location.as_deref() == Some(loc.as_str()),
                None => true,
            })
            .filter(|p| match filter.looking_for {
                Some(ref intent) => &p.looking_for == intent,
                None => true,
            })
            .cloned()
            .collect();

        Ok(matching)
    }
}

impl LikeStore for MemoryStore {
    fn find_pair(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<Option<Like>> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.liker_id == liker_id && l.liked_id == liked_id)
            .cloned())
    }

    fn create(&self, like: NewLike) -> AppResult<Like> {
        let mut rows = self.likes.lock().unwrap();
        if rows
            .iter()
            .any(|l| l.liker_id == like.liker_id && l.liked_id == like.liked_id)
        {
            return Err(AppError::new(ErrorCode::AlreadyLiked, "already liked"));
        }
        let created = Like {
            id: Uuid::new_v4(),
            liker_id: like.liker_id,
            liked_id: like.liked_id,
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    fn delete_pair(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<bool> {
        let mut rows = self.likes.lock().unwrap();
        let before = rows.len();
        rows.retain(|l| !(l.liker_id == liker_id && l.liked_id == liked_id));
        Ok(rows.len() < before)
    }

    fn given(&self, liker_id: Uuid) -> AppResult<Vec<Like>> {
        let mut rows: Vec<Like> = self
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.liker_id == liker_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    fn received(&self, liked_id: Uuid) -> AppResult<Vec<Like>> {
        let mut rows: Vec<Like> = self
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.liked_id == liked_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

impl MatchStore for MemoryStore {
    fn find_active_pair(&self, user_a_id: Uuid, user_b_id: Uuid) -> AppResult<Option<Match>> {
        Ok(self
            .matches
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.user_a_id == user_a_id && m.user_b_id == user_b_id && m.is_active)
            .cloned())
    }

    fn upsert_pair(&self, new_match: NewMatch) -> AppResult<Match> {
        let mut rows = self.matches.lock().unwrap();
        if let Some(existing) = rows
            .iter_mut()
            .find(|m| m.user_a_id == new_match.user_a_id && m.user_b_id == new_match.user_b_id)
        {
            if !existing.is_active {
                existing.is_active = true;
                existing.matched_at = Utc::now();
            }
            return Ok(existing.clone());
        }
        let created = Match {
            id: Uuid::new_v4(),
            user_a_id: new_match.user_a_id,
            user_b_id: new_match.user_b_id,
            is_active: true,
            matched_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    fn deactivate_pair(&self, user_a_id: Uuid, user_b_id: Uuid) -> AppResult<bool> {
        let mut rows = self.matches.lock().unwrap();
        match rows
            .iter_mut()
            .find(|m| m.user_a_id == user_a_id && m.user_b_id == user_b_id && m.is_active)
        {
            Some(row) => {
                row.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn active_for_user(&self, user_id: Uuid) -> AppResult<Vec<Match>> {
        let mut rows: Vec<Match> = self
            .matches
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.is_active && (m.user_a_id == user_id || m.user_b_id == user_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.matched_at.cmp(&a.matched_at));
        Ok(rows)
    }
}
