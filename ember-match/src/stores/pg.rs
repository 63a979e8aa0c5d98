use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use ember_shared::clients::db::DbPool;
use ember_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{Like, Match, NewLike, NewMatch, NewProfile, Profile, UpdateProfile, User};
use crate::schema::{likes, matches, profiles, users};

use super::{CandidateFilter, LikeStore, MatchStore, ProfileStore, UserStore};

type PgConn = PooledConnection<ConnectionManager<diesel::PgConnection>>;

fn get_conn(pool: &DbPool) -> AppResult<PgConn> {
    pool.get().map_err(|e| AppError::internal(e.to_string()))
}

// --- Users ---

pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    fn find(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let mut conn = get_conn(&self.pool)?;
        let user = users::table
            .find(user_id)
            .first::<User>(&mut conn)
            .optional()?;
        Ok(user)
    }
}

// --- Profiles ---

pub struct PgProfileStore {
    pool: DbPool,
}

impl PgProfileStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProfileStore for PgProfileStore {
    fn find(&self, profile_id: Uuid) -> AppResult<Option<Profile>> {
        let mut conn = get_conn(&self.pool)?;
        let profile = profiles::table
            .find(profile_id)
            .first::<Profile>(&mut conn)
            .optional()?;
        Ok(profile)
    }

    fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let mut conn = get_conn(&self.pool)?;
        let profile = profiles::table
            .filter(profiles::user_id.eq(user_id))
            .first::<Profile>(&mut conn)
            .optional()?;
        Ok(profile)
    }

    fn find_by_users(&self, user_ids: &[Uuid]) -> AppResult<Vec<Profile>> {
        let mut conn = get_conn(&self.pool)?;
        let rows = profiles::table
            .filter(profiles::user_id.eq_any(user_ids))
            .load::<Profile>(&mut conn)?;
        Ok(rows)
    }

    fn create(&self, profile: NewProfile) -> AppResult<Profile> {
        let mut conn = get_conn(&self.pool)?;
        diesel::insert_into(profiles::table)
            .values(&profile)
            .get_result::<Profile>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    AppError::new(ErrorCode::ProfileAlreadyExists, "profile already exists")
                }
                other => other.into(),
            })
    }

    fn update(&self, user_id: Uuid, changes: UpdateProfile) -> AppResult<Profile> {
        let mut conn = get_conn(&self.pool)?;
        let updated = diesel::update(profiles::table.filter(profiles::user_id.eq(user_id)))
            .set((&changes, profiles::updated_at.eq(chrono::Utc::now())))
            .get_result::<Profile>(&mut conn)?;
        Ok(updated)
    }

    fn delete_by_user(&self, user_id: Uuid) -> AppResult<bool> {
        let mut conn = get_conn(&self.pool)?;
        let deleted = diesel::delete(profiles::table.filter(profiles::user_id.eq(user_id)))
            .execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn candidates(&self, filter: &CandidateFilter) -> AppResult<Vec<Profile>> {
        let mut conn = get_conn(&self.pool)?;

        let mut query = profiles::table
            .inner_join(users::table)
            .filter(users::is_active.eq(true))
            .select(profiles::all_columns)
            .into_boxed();

        if let Some(exclude) = filter.exclude_user {
            query = query.filter(profiles::user_id.ne(exclude));
        }
        if filter.require_verified {
            query = query.filter(users::is_verified.eq(true));
        }
        if let Some(ref location) = filter.location {
            query = query.filter(profiles::location.eq(location.clone()));
        }
        if let Some(ref looking_for) = filter.looking_for {
            query = query.filter(profiles::looking_for.eq(looking_for.clone()));
        }

        let rows = query.load::<Profile>(&mut conn)?;
        Ok(rows)
    }
}

// --- Likes ---

pub struct PgLikeStore {
    pool: DbPool,
}

impl PgLikeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl LikeStore for PgLikeStore {
    fn find_pair(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<Option<Like>> {
        let mut conn = get_conn(&self.pool)?;
        let like = likes::table
            .filter(likes::liker_id.eq(liker_id))
            .filter(likes::liked_id.eq(liked_id))
            .first::<Like>(&mut conn)
            .optional()?;
        Ok(like)
    }

    fn create(&self, like: NewLike) -> AppResult<Like> {
        let mut conn = get_conn(&self.pool)?;
        diesel::insert_into(likes::table)
            .values(&like)
            .get_result::<Like>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    AppError::new(ErrorCode::AlreadyLiked, "already liked")
                }
                other => other.into(),
            })
    }

    fn delete_pair(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<bool> {
        let mut conn = get_conn(&self.pool)?;
        let deleted = diesel::delete(
            likes::table
                .filter(likes::liker_id.eq(liker_id))
                .filter(likes::liked_id.eq(liked_id)),
        )
        .execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn given(&self, liker_id: Uuid) -> AppResult<Vec<Like>> {
        let mut conn = get_conn(&self.pool)?;
        let rows = likes::table
            .filter(likes::liker_id.eq(liker_id))
            .order(likes::created_at.desc())
            .load::<Like>(&mut conn)?;
        Ok(rows)
    }

    fn received(&self, liked_id: Uuid) -> AppResult<Vec<Like>> {
        let mut conn = get_conn(&self.pool)?;
        let rows = likes::table
            .filter(likes::liked_id.eq(liked_id))
            .order(likes::created_at.desc())
            .load::<Like>(&mut conn)?;
        Ok(rows)
    }
}

// --- Matches ---

pub struct PgMatchStore {
    pool: DbPool,
}

impl PgMatchStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl MatchStore for PgMatchStore {
    fn find_active_pair(&self, user_a_id: Uuid, user_b_id: Uuid) -> AppResult<Option<Match>> {
        let mut conn = get_conn(&self.pool)?;
        let row = matches::table
            .filter(matches::user_a_id.eq(user_a_id))
            .filter(matches::user_b_id.eq(user_b_id))
            .filter(matches::is_active.eq(true))
            .first::<Match>(&mut conn)
            .optional()?;
        Ok(row)
    }

    fn upsert_pair(&self, new_match: NewMatch) -> AppResult<Match> {
        let mut conn = get_conn(&self.pool)?;

        // The unique constraint on (user_a_id, user_b_id) absorbs racing
        // inserts; losing the race is not an error.
        diesel::insert_into(matches::table)
            .values(&new_match)
            .on_conflict((matches::user_a_id, matches::user_b_id))
            .do_nothing()
            .execute(&mut conn)?;

        let existing = matches::table
            .filter(matches::user_a_id.eq(new_match.user_a_id))
            .filter(matches::user_b_id.eq(new_match.user_b_id))
            .first::<Match>(&mut conn)?;

        if existing.is_active {
            return Ok(existing);
        }

        let revived = diesel::update(matches::table.find(existing.id))
            .set((
                matches::is_active.eq(true),
                matches::matched_at.eq(chrono::Utc::now()),
            ))
            .get_result::<Match>(&mut conn)?;
        Ok(revived)
    }

    fn deactivate_pair(&self, user_a_id: Uuid, user_b_id: Uuid) -> AppResult<bool> {
        let mut conn = get_conn(&self.pool)?;
        let updated = diesel::update(
            matches::table
                .filter(matches::user_a_id.eq(user_a_id))
                .filter(matches::user_b_id.eq(user_b_id))
                .filter(matches::is_active.eq(true)),
        )
        .set(matches::is_active.eq(false))
        .execute(&mut conn)?;
        Ok(updated > 0)
    }

    fn active_for_user(&self, user_id: Uuid) -> AppResult<Vec<Match>> {
        let mut conn = get_conn(&self.pool)?;
        let rows = matches::table
            .filter(matches::is_active.eq(true))
            .filter(
                matches::user_a_id
                    .eq(user_id)
                    .or(matches::user_b_id.eq(user_id)),
            )
            .order(matches::matched_at.desc())
            .load::<Match>(&mut conn)?;
        Ok(rows)
    }
}
