//! Database operations for the `profiles` table.
//!
//! A profile is written once with its raw payload and later enriched exactly
//! once by [`mark_profile_processed`]. The `processed = false` guard on that
//! update is what makes enrichment idempotent across overlapping runs.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `profiles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub username: String,
    pub raw_payload: Value,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub experience_years: i32,
    pub processed: bool,
    pub processed_at: Option<DateTime<Utc>>,
    pub collected_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// The subset of a profile row the enrichment stage needs.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UnprocessedProfileRow {
    pub id: i64,
    pub username: String,
    pub raw_payload: Value,
}

/// Inserts a profile unless one already exists for `username`.
///
/// Returns `true` when a row was written, `false` when the `username`
/// conflict suppressed it.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails for any other reason.
pub async fn insert_profile(
    pool: &PgPool,
    username: &str,
    raw_payload: &Value,
) -> Result<bool, DbError> {
    let inserted = sqlx::query_scalar::<_, i64>(
        "INSERT INTO profiles (username, raw_payload) \
         VALUES ($1, $2) \
         ON CONFLICT (username) DO NOTHING \
         RETURNING id",
    )
    .bind(username)
    .bind(raw_payload)
    .fetch_optional(pool)
    .await
    .map_err(DbError::from_write)?;

    Ok(inserted.is_some())
}

/// Returns `true` if a profile row exists for `username`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn profile_exists(pool: &PgPool, username: &str) -> Result<bool, DbError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM profiles WHERE username = $1)",
    )
    .bind(username)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Returns the stored profile for `username`, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_profile_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<ProfileRow>, DbError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "SELECT id, username, raw_payload, skills, languages, experience_years, \
                processed, processed_at, collected_at, created_at \
         FROM profiles \
         WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Lists every profile still awaiting enrichment, in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_unprocessed_profiles(
    pool: &PgPool,
) -> Result<Vec<UnprocessedProfileRow>, DbError> {
    let rows = sqlx::query_as::<_, UnprocessedProfileRow>(
        "SELECT id, username, raw_payload \
         FROM profiles \
         WHERE processed = false \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Writes derived fields and flips `processed` to `true`.
///
/// Returns `false` when the row was already processed (or no longer exists);
/// derived fields are never overwritten once set.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails, including when
/// `experience_years` is negative.
pub async fn mark_profile_processed(
    pool: &PgPool,
    id: i64,
    skills: &[String],
    languages: &[String],
    experience_years: i32,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "UPDATE profiles \
         SET skills = $2, \
             languages = $3, \
             experience_years = $4, \
             processed = true, \
             processed_at = NOW() \
         WHERE id = $1 AND processed = false",
    )
    .bind(id)
    .bind(skills)
    .bind(languages)
    .bind(experience_years)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Total number of profiles.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_profiles(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
