use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use ember_shared::errors::{AppError, AppResult, ErrorCode};
use ember_shared::types::pagination::{Paginated, PaginationParams};

use crate::matching::scoring::{common_interests, compatibility_score, ProfileFacts};
use crate::models::{Intent, Profile};
use crate::stores::{CandidateFilter, LikeStore, MatchStore, ProfileStore};

#[derive(Debug, Clone, Default)]
pub struct DiscoveryFilters {
    pub location: Option<String>,
    pub intent: Option<Intent>,
    pub min_common_interests: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ScoredProfile {
    pub profile: Profile,
    pub score: f64,
}

pub struct DiscoveryService {
    profiles: Arc<dyn ProfileStore>,
    likes: Arc<dyn LikeStore>,
    matches: Arc<dyn MatchStore>,
    require_verified: bool,
}

impl DiscoveryService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        likes: Arc<dyn LikeStore>,
        matches: Arc<dyn MatchStore>,
        require_verified: bool,
    ) -> Self {
        Self {
            profiles,
            likes,
            matches,
            require_verified,
        }
    }

    /// Ranked candidate feed for a viewer. Read-only.
    pub fn discover(
        &self,
        viewer_id: Uuid,
        filters: &DiscoveryFilters,
        page: &PaginationParams,
    ) -> AppResult<Paginated<ScoredProfile>> {
        let viewer = self
            .profiles
            .find_by_user(viewer_id)?
            .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "no profile"))?;

        let candidate_filter = CandidateFilter {
            exclude_user: Some(viewer_id),
            location: filters.location.clone(),
            looking_for: filters.intent.map(|i| i.to_string()),
            require_verified: self.require_verified,
        };
        let pool = self.profiles.candidates(&candidate_filter)?;

        // Anyone already on an edge with the viewer never reappears in the feed
        let mut excluded: HashSet<Uuid> = self
            .likes
            .given(viewer_id)?
            .into_iter()
            .map(|l| l.liked_id)
            .collect();
        for m in self.matches.active_for_user(viewer_id)? {
            excluded.insert(m.user_a_id);
            excluded.insert(m.user_b_id);
        }

        let viewer_facts = ProfileFacts::from(&viewer);
        let now = Utc::now();

        let mut scored: Vec<ScoredProfile> = pool
            .into_iter()
            .filter(|p| !excluded.contains(&p.user_id))
            .filter(|p| match filters.min_common_interests {
                Some(min) => common_interests(&viewer.interests, &p.interests) >= min,
                None => true,
            })
            .map(|p| {
                let score = compatibility_score(&viewer_facts, &ProfileFacts::from(&p), now);
                ScoredProfile { profile: p, score }
            })
            .collect();

        // Score descending; equal scores order by profile recency then user
        // id so the ranking is total
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.profile.created_at.cmp(&a.profile.created_at))
                .then_with(|| a.profile.user_id.cmp(&b.profile.user_id))
        });

        let total = scored.len() as u64;
        let items: Vec<ScoredProfile> = scored
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(Paginated::new(items, total, page))
    }
}
