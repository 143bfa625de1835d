//! Database operations for the `people` table.
//!
//! Person rows are an append-only audit of every candidate ever discovered:
//! this module inserts and reads them but never updates or deletes.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `people` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PersonRow {
    pub id: i64,
    pub external_id: i64,
    pub source_graph_id: String,
    pub display_name: String,
    pub username: String,
    pub headline: String,
    pub image_url: Option<String>,
    pub completion: f64,
    pub verified: bool,
    pub rank: f64,
    pub search_query: Option<String>,
    pub collected_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a newly discovered person.
#[derive(Debug, Clone)]
pub struct NewPerson<'a> {
    pub external_id: i64,
    pub source_graph_id: &'a str,
    pub display_name: &'a str,
    pub username: &'a str,
    pub headline: &'a str,
    pub image_url: Option<&'a str>,
    pub completion: f64,
    pub verified: bool,
    pub rank: f64,
    pub search_query: Option<&'a str>,
    pub collected_at: DateTime<Utc>,
}

/// A person that has no matching row in `profiles` yet.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PendingPersonRow {
    pub username: String,
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Inserts a person unless one with the same `external_id` already exists.
///
/// Returns `true` when a row was written and `false` when the insert was
/// suppressed by the `external_id` conflict, which callers treat as the
/// duplicate signal. This closes the check-then-insert race without a
/// transaction.
///
/// # Errors
///
/// Returns [`DbError::Conflict`] if a *different* person already holds the
/// same `username`, or [`DbError::Sqlx`] for any other failure (including the
/// `completion`/`rank` range checks).
pub async fn insert_person(pool: &PgPool, person: &NewPerson<'_>) -> Result<bool, DbError> {
    let inserted = sqlx::query_scalar::<_, i64>(
        "INSERT INTO people \
             (external_id, source_graph_id, display_name, username, headline, image_url, \
              completion, verified, rank, search_query, collected_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         ON CONFLICT (external_id) DO NOTHING \
         RETURNING id",
    )
    .bind(person.external_id)
    .bind(person.source_graph_id)
    .bind(person.display_name)
    .bind(person.username)
    .bind(person.headline)
    .bind(person.image_url)
    .bind(person.completion)
    .bind(person.verified)
    .bind(person.rank)
    .bind(person.search_query)
    .bind(person.collected_at)
    .fetch_optional(pool)
    .await
    .map_err(DbError::from_write)?;

    Ok(inserted.is_some())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

const PERSON_COLUMNS: &str = "id, external_id, source_graph_id, display_name, username, headline, \
     image_url, completion, verified, rank, search_query, collected_at, created_at";

/// Returns the person with the given source identity, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_person_by_external_id(
    pool: &PgPool,
    external_id: i64,
) -> Result<Option<PersonRow>, DbError> {
    let row = sqlx::query_as::<_, PersonRow>(&format!(
        "SELECT {PERSON_COLUMNS} FROM people WHERE external_id = $1"
    ))
    .bind(external_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns every person whose `username` has no row in `profiles`, oldest
/// first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_pending_people(pool: &PgPool) -> Result<Vec<PendingPersonRow>, DbError> {
    let rows = sqlx::query_as::<_, PendingPersonRow>(
        "SELECT p.username, p.display_name \
         FROM people p \
         LEFT JOIN profiles pr ON pr.username = p.username \
         WHERE pr.id IS NULL \
         ORDER BY p.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Total number of people.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_people(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM people")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
