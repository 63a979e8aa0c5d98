use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use ember_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{Like, Match, NewLike, NewMatch, Profile};
use crate::stores::{LikeStore, MatchStore, ProfileStore};

#[derive(Debug)]
pub struct LikeOutcome {
    pub is_match: bool,
    pub match_id: Option<Uuid>,
    pub like: Like,
}

#[derive(Debug, Serialize)]
pub struct MatchSummary {
    pub id: Uuid,
    pub matched_at: DateTime<Utc>,
    pub profile: Profile,
}

pub struct MatchService {
    profiles: Arc<dyn ProfileStore>,
    likes: Arc<dyn LikeStore>,
    matches: Arc<dyn MatchStore>,
}

impl MatchService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        likes: Arc<dyn LikeStore>,
        matches: Arc<dyn MatchStore>,
    ) -> Self {
        Self {
            profiles,
            likes,
            matches,
        }
    }

    /// Record a directed like; when the reciprocal like already exists the
    /// pair becomes a match.
    pub fn like(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<LikeOutcome> {
        if liker_id == liked_id {
            return Err(AppError::new(ErrorCode::CannotLikeSelf, "cannot like yourself"));
        }

        self.profiles
            .find_by_user(liker_id)?
            .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "profile not found"))?;
        self.profiles
            .find_by_user(liked_id)?
            .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "liked profile not found"))?;

        if self.likes.find_pair(liker_id, liked_id)?.is_some() {
            return Err(AppError::new(ErrorCode::AlreadyLiked, "already liked"));
        }

        let like = self.likes.create(NewLike { liker_id, liked_id })?;

        if self.likes.find_pair(liked_id, liker_id)?.is_none() {
            return Ok(LikeOutcome {
                is_match: false,
                match_id: None,
                like,
            });
        }

        // Both directed likes exist. The pair-key upsert absorbs the race
        // where both sides like at once; losing that race still lands here
        // with the same match row.
        let (user_a_id, user_b_id) = Match::canonical_pair(liker_id, liked_id);
        let matched = self.matches.upsert_pair(NewMatch { user_a_id, user_b_id })?;

        tracing::info!(
            match_id = %matched.id,
            user_a = %matched.user_a_id,
            user_b = %matched.user_b_id,
            "mutual like, match created"
        );

        Ok(LikeOutcome {
            is_match: true,
            match_id: Some(matched.id),
            like,
        })
    }

    /// Remove a directed like. An active match for the pair dissolves
    /// entirely: the match deactivates and the reciprocal like is deleted
    /// too, so a later single-sided re-like cannot revive it. Returns the
    /// dissolved match, if there was one.
    pub fn unlike(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<Option<Match>> {
        if !self.likes.delete_pair(liker_id, liked_id)? {
            return Err(AppError::new(ErrorCode::LikeNotFound, "like not found"));
        }

        let (user_a_id, user_b_id) = Match::canonical_pair(liker_id, liked_id);
        let active = match self.matches.find_active_pair(user_a_id, user_b_id)? {
            Some(m) => m,
            None => return Ok(None),
        };

        self.matches.deactivate_pair(user_a_id, user_b_id)?;
        self.likes.delete_pair(liked_id, liker_id)?;

        tracing::info!(match_id = %active.id, "match dissolved on unlike");

        Ok(Some(active))
    }

    /// Active matches for a user with the partner profile attached, most
    /// recent first. Matches whose partner profile is gone are skipped.
    pub fn matches_for(&self, user_id: Uuid) -> AppResult<Vec<MatchSummary>> {
        let matches = self.matches.active_for_user(user_id)?;
        let partner_ids: Vec<Uuid> = matches.iter().map(|m| m.partner_of(user_id)).collect();

        let by_user: HashMap<Uuid, Profile> = self
            .profiles
            .find_by_users(&partner_ids)?
            .into_iter()
            .map(|p| (p.user_id, p))
            .collect();

        let summaries = matches
            .into_iter()
            .filter_map(|m| {
                by_user.get(&m.partner_of(user_id)).map(|p| MatchSummary {
                    id: m.id,
                    matched_at: m.matched_at,
                    profile: p.clone(),
                })
            })
            .collect();

        Ok(summaries)
    }

    /// Profiles the user has liked, most recent like first.
    pub fn likes_given(&self, user_id: Uuid) -> AppResult<Vec<Profile>> {
        let likes = self.likes.given(user_id)?;
        let ids: Vec<Uuid> = likes.iter().map(|l| l.liked_id).collect();
        self.profiles_in_order(&ids)
    }

    /// Profiles that liked the user, most recent like first.
    pub fn likes_received(&self, user_id: Uuid) -> AppResult<Vec<Profile>> {
        let likes = self.likes.received(user_id)?;
        let ids: Vec<Uuid> = likes.iter().map(|l| l.liker_id).collect();
        self.profiles_in_order(&ids)
    }

    // Preserve the like-recency order when loading profiles in a batch.
    fn profiles_in_order(&self, user_ids: &[Uuid]) -> AppResult<Vec<Profile>> {
        let mut profiles = self.profiles.find_by_users(user_ids)?;
        let id_order: HashMap<Uuid, usize> = user_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();
        profiles.sort_by_key(|p| id_order.get(&p.user_id).copied().unwrap_or(usize::MAX));
        Ok(profiles)
    }
}
