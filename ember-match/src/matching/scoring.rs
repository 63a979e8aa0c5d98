use chrono::{DateTime, Utc};

use crate::models::{Intent, Profile};

// -- Weights — fixed by design, sum to 1.0 --
const W_INTERESTS: f64 = 0.40;
const W_LOCATION: f64 = 0.30;
const W_INTENT: f64 = 0.20;
const W_RECENCY: f64 = 0.10;

// Recency decays linearly to zero over this window.
const RECENCY_WINDOW_DAYS: f64 = 30.0;

/// The profile fields the scorer reads. Extracted so scoring stays a pure
/// function over plain data.
#[derive(Debug, Clone)]
pub struct ProfileFacts {
    pub interests: Vec<String>,
    pub location: Option<String>,
    pub intent: Intent,
    pub created_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileFacts {
    fn from(profile: &Profile) -> Self {
        Self {
            interests: profile.interests.clone(),
            location: profile.location.clone(),
            intent: profile.intent(),
            created_at: profile.created_at,
        }
    }
}

/// Literal interest intersection size, used for the overlap term and the
/// min_common_interests discovery threshold.
pub fn common_interests(a: &[String], b: &[String]) -> usize {
    a.iter().filter(|tag| b.contains(tag)).count()
}

fn interest_score(viewer: &ProfileFacts, candidate: &ProfileFacts) -> f64 {
    if viewer.interests.is_empty() || candidate.interests.is_empty() {
        return 0.0;
    }
    let overlap = common_interests(&viewer.interests, &candidate.interests);
    let max_len = viewer.interests.len().max(candidate.interests.len());
    overlap as f64 / max_len as f64
}

/// Exact match (trimmed, case-insensitive) scores full, substring containment
/// in either direction scores half. Empty or missing locations score zero.
fn location_score(viewer: &ProfileFacts, candidate: &ProfileFacts) -> f64 {
    let (a, b) = match (&viewer.location, &candidate.location) {
        (Some(a), Some(b)) => (a.trim().to_lowercase(), b.trim().to_lowercase()),
        _ => return 0.0,
    };
    if a.is_empty() || b.is_empty() {
        0.0
    } else if a == b {
        1.0
    } else if a.contains(&b) || b.contains(&a) {
        0.5
    } else {
        0.0
    }
}

fn intent_score(a: Intent, b: Intent) -> f64 {
    use Intent::*;
    match (a, b) {
        (All, _) | (_, All) => 1.0,
        (x, y) if x == y => 1.0,
        (Friendship, Hobby) | (Hobby, Friendship) => 0.5,
        (Dating, Friendship) | (Friendship, Dating) => 0.5,
        _ => 0.0,
    }
}

/// Fresh profiles score full; the bonus decays to zero at 30 days. A
/// negative age (clock skew) clamps to full.
fn recency_score(candidate: &ProfileFacts, now: DateTime<Utc>) -> f64 {
    let age_days = (now - candidate.created_at).num_seconds() as f64 / 86_400.0;
    if age_days <= 0.0 {
        return 1.0;
    }
    (1.0 - age_days / RECENCY_WINDOW_DAYS).max(0.0)
}

/// Compatibility between a viewer and a candidate profile, in [0, 1].
///
/// Not symmetric: the recency term reads only the candidate, so
/// `compatibility_score(a, b, now)` and `compatibility_score(b, a, now)` can
/// differ.
pub fn compatibility_score(
    viewer: &ProfileFacts,
    candidate: &ProfileFacts,
    now: DateTime<Utc>,
) -> f64 {
    let score = W_INTERESTS * interest_score(viewer, candidate)
        + W_LOCATION * location_score(viewer, candidate)
        + W_INTENT * intent_score(viewer.intent, candidate.intent)
        + W_RECENCY * recency_score(candidate, now);

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn facts(interests: &[&str], location: Option<&str>, intent: Intent, age_days: i64) -> ProfileFacts {
        ProfileFacts {
            interests: interests.iter().map(|s| s.to_string()).collect(),
            location: location.map(|s| s.to_string()),
            intent,
            created_at: Utc::now() - Duration::days(age_days),
        }
    }

    #[test]
    fn identical_fresh_profiles_score_one() {
        let now = Utc::now();
        let a = ProfileFacts {
            interests: vec!["music".into(), "hiking".into()],
            location: Some("Berlin".into()),
            intent: Intent::Dating,
            created_at: now,
        };
        let score = compatibility_score(&a, &a, now);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn half_overlap_same_city_both_all() {
        // 0.4 * 1/2 + 0.3 + 0.2 + 0.1 = 0.8
        let now = Utc::now();
        let viewer = ProfileFacts {
            interests: vec!["music".into(), "hiking".into()],
            location: Some("Lisbon".into()),
            intent: Intent::All,
            created_at: now,
        };
        let candidate = ProfileFacts {
            interests: vec!["music".into(), "art".into()],
            location: Some("Lisbon".into()),
            intent: Intent::All,
            created_at: now,
        };
        let score = compatibility_score(&viewer, &candidate, now);
        assert!((score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn empty_interests_contribute_zero() {
        let viewer = facts(&[], Some("Paris"), Intent::All, 0);
        let candidate = facts(&["music"], Some("Paris"), Intent::All, 0);
        let score = compatibility_score(&viewer, &candidate, Utc::now());
        // location + intent + recency only
        assert!((score - 0.6).abs() < 1e-6);
    }

    #[test]
    fn location_substring_scores_half_weight() {
        let viewer = facts(&[], Some("Berlin"), Intent::Hobby, 40);
        let candidate = facts(&[], Some("berlin mitte"), Intent::Hobby, 40);
        let score = compatibility_score(&viewer, &candidate, Utc::now());
        // 0.15 location + 0.2 intent, recency fully decayed
        assert!((score - 0.35).abs() < 1e-6);
    }

    #[test]
    fn location_is_trimmed_and_case_insensitive() {
        let viewer = facts(&[], Some("  LISBON "), Intent::All, 40);
        let candidate = facts(&[], Some("lisbon"), Intent::All, 40);
        let score = compatibility_score(&viewer, &candidate, Utc::now());
        assert!((score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn intent_pairs() {
        assert_eq!(intent_score(Intent::All, Intent::Dating), 1.0);
        assert_eq!(intent_score(Intent::Hobby, Intent::Hobby), 1.0);
        assert_eq!(intent_score(Intent::Friendship, Intent::Hobby), 0.5);
        assert_eq!(intent_score(Intent::Dating, Intent::Friendship), 0.5);
        assert_eq!(intent_score(Intent::Dating, Intent::Hobby), 0.0);
    }

    #[test]
    fn recency_decays_linearly() {
        let now = Utc::now();
        let half = facts(&[], None, Intent::All, 15);
        assert!((recency_score(&half, now) - 0.5).abs() < 1e-3);

        let old = facts(&[], None, Intent::All, 31);
        assert_eq!(recency_score(&old, now), 0.0);
    }

    #[test]
    fn future_created_at_clamps_to_full_recency() {
        let now = Utc::now();
        let skewed = facts(&[], None, Intent::All, -2);
        assert_eq!(recency_score(&skewed, now), 1.0);
    }

    #[test]
    fn score_is_direction_dependent() {
        let now = Utc::now();
        let fresh = facts(&["music"], None, Intent::All, 0);
        let stale = facts(&["music"], None, Intent::All, 60);
        let forward = compatibility_score(&fresh, &stale, now);
        let backward = compatibility_score(&stale, &fresh, now);
        assert!(backward > forward);
    }

    #[test]
    fn score_stays_in_unit_interval() {
        let now = Utc::now();
        let viewer = facts(&["a", "b", "c"], Some("x"), Intent::All, -10);
        let candidate = facts(&["a", "b", "c"], Some("x"), Intent::All, -10);
        let score = compatibility_score(&viewer, &candidate, now);
        assert!(score <= 1.0);
        assert!(score >= 0.0);
    }
}
