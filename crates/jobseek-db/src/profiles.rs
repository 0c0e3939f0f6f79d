//! Database operations for the `profiles` and `skills` tables.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use jobseek_core::{AppRole, SkillCategory};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `profiles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row from the `skills` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update of a profile's contact fields. `Some(v)` sets the value,
/// `None` preserves the existing one.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
    pub avatar_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns a profile by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_profile(pool: &PgPool, id: Uuid) -> Result<Option<ProfileRow>, DbError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "SELECT id, username, full_name, mobile_number, avatar_url, role, created_at, updated_at \
         FROM profiles \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Creates a profile or refreshes its name fields if it already exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails (including username
/// uniqueness violations).
pub async fn upsert_profile(
    pool: &PgPool,
    id: Uuid,
    username: Option<&str>,
    full_name: Option<&str>,
    role: AppRole,
) -> Result<ProfileRow, DbError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "INSERT INTO profiles (id, username, full_name, role) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (id) DO UPDATE SET \
             username = COALESCE(EXCLUDED.username, profiles.username), \
             full_name = COALESCE(EXCLUDED.full_name, profiles.full_name), \
             updated_at = NOW() \
         RETURNING id, username, full_name, mobile_number, avatar_url, role, created_at, updated_at",
    )
    .bind(id)
    .bind(username)
    .bind(full_name)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Overlays the supplied contact fields onto an existing profile.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no profile has this id, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    update: &ProfileUpdate,
) -> Result<ProfileRow, DbError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "UPDATE profiles \
         SET username      = COALESCE($2, username), \
             full_name     = COALESCE($3, full_name), \
             mobile_number = COALESCE($4, mobile_number), \
             avatar_url    = COALESCE($5, avatar_url), \
             updated_at    = NOW() \
         WHERE id = $1 \
         RETURNING id, username, full_name, mobile_number, avatar_url, role, created_at, updated_at",
    )
    .bind(id)
    .bind(&update.username)
    .bind(&update.full_name)
    .bind(&update.mobile_number)
    .bind(&update.avatar_url)
    .fetch_optional(pool)
    .await?;

    row.ok_or(DbError::NotFound)
}

/// Returns a user's skills in the order they were added.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_skills(pool: &PgPool, user_id: Uuid) -> Result<Vec<SkillRow>, DbError> {
    let rows = sqlx::query_as::<_, SkillRow>(
        "SELECT id, user_id, name, category, created_at \
         FROM skills \
         WHERE user_id = $1 \
         ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Adds a skill to a user's profile and returns the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn add_skill(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    category: Option<SkillCategory>,
) -> Result<SkillRow, DbError> {
    let row = sqlx::query_as::<_, SkillRow>(
        "INSERT INTO skills (user_id, name, category) \
         VALUES ($1, $2, $3) \
         RETURNING id, user_id, name, category, created_at",
    )
    .bind(user_id)
    .bind(name)
    .bind(category.map(SkillCategory::as_str))
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Removes one of the user's skills. The user scope keeps one account from
/// deleting another account's rows.
///
/// Returns the number of rows deleted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn delete_skill(pool: &PgPool, user_id: Uuid, skill_id: Uuid) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM skills WHERE id = $1 AND user_id = $2")
        .bind(skill_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
