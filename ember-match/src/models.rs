use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::schema::{likes, matches, profiles, users};

// --- User ---
// Owned by the auth service; this service only reads the gating flags.

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = users)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

// --- Intent ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Dating,
    Friendship,
    Hobby,
    All,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Dating => write!(f, "DATING"),
            Intent::Friendship => write!(f, "FRIENDSHIP"),
            Intent::Hobby => write!(f, "HOBBY"),
            Intent::All => write!(f, "ALL"),
        }
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DATING" => Ok(Intent::Dating),
            "FRIENDSHIP" => Ok(Intent::Friendship),
            "HOBBY" => Ok(Intent::Hobby),
            "ALL" => Ok(Intent::All),
            _ => Err(format!("unknown intent: {s}")),
        }
    }
}

// --- Profile ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = profiles)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub location: Option<String>,
    pub looking_for: String,
    pub voice_bio_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Stored intent as the typed enum; unknown values read as ALL.
    pub fn intent(&self) -> Intent {
        Intent::from_str(&self.looking_for).unwrap_or(Intent::All)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = profiles)]
pub struct NewProfile {
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub location: Option<String>,
    pub looking_for: String,
    pub voice_bio_url: Option<String>,
}

#[derive(Debug, AsChangeset, Deserialize, Default)]
#[diesel(table_name = profiles)]
pub struct UpdateProfile {
    pub bio: Option<String>,
    pub interests: Option<Vec<String>>,
    pub location: Option<String>,
    pub looking_for: Option<String>,
    pub voice_bio_url: Option<String>,
}

// --- Like ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = likes)]
pub struct Like {
    pub id: Uuid,
    pub liker_id: Uuid,
    pub liked_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = likes)]
pub struct NewLike {
    pub liker_id: Uuid,
    pub liked_id: Uuid,
}

// --- Match ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = matches)]
pub struct Match {
    pub id: Uuid,
    pub user_a_id: Uuid,
    pub user_b_id: Uuid,
    pub is_active: bool,
    pub matched_at: DateTime<Utc>,
}

impl Match {
    /// Canonical storage order for an unordered user pair: one row per pair
    /// no matter which side liked first.
    pub fn canonical_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
        if a < b { (a, b) } else { (b, a) }
    }

    pub fn partner_of(&self, user_id: Uuid) -> Uuid {
        if self.user_a_id == user_id {
            self.user_b_id
        } else {
            self.user_a_id
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = matches)]
pub struct NewMatch {
    pub user_a_id: Uuid,
    pub user_b_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_pair_orders_both_ways() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        assert_eq!(Match::canonical_pair(a, b), (a, b));
        assert_eq!(Match::canonical_pair(b, a), (a, b));
    }

    #[test]
    fn intent_roundtrips_through_storage_form() {
        for intent in [Intent::Dating, Intent::Friendship, Intent::Hobby, Intent::All] {
            assert_eq!(intent.to_string().parse::<Intent>().unwrap(), intent);
        }
        assert!("SOMETHING_ELSE".parse::<Intent>().is_err());
    }
}
