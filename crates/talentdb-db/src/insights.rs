//! Read-model queries backing the analysis endpoints.
//!
//! These return raw aggregates; rounding and bucketing live in
//! `talentdb_core::insights`.

use sqlx::PgPool;

use crate::DbError;

/// A `(label, count)` pair from an `unnest` + `GROUP BY` aggregate.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LabelCountRow {
    pub label: String,
    pub count: i64,
}

/// Person summary for the top-completion leaderboard.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopPersonRow {
    pub display_name: String,
    pub username: String,
    pub completion: f64,
    pub verified: bool,
}

/// Corpus-wide counts feeding the data-quality metrics.
#[derive(Debug, Clone, Copy, Default, sqlx::FromRow)]
pub struct QualityCountsRow {
    pub total_people: i64,
    pub total_profiles: i64,
    pub verified_people: i64,
    pub processed_profiles: i64,
    pub avg_completion: Option<f64>,
}

/// Per-search-query aggregate over people.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QueryStatRow {
    pub search_query: String,
    pub count: i64,
    pub avg_completion: Option<f64>,
    pub verified_count: i64,
}

/// Skill frequency across processed profiles, most common first, ties by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn top_skills(pool: &PgPool, limit: i64) -> Result<Vec<LabelCountRow>, DbError> {
    let rows = sqlx::query_as::<_, LabelCountRow>(
        "SELECT skill AS label, COUNT(*) AS count \
         FROM profiles, unnest(skills) AS skill \
         WHERE processed = true \
         GROUP BY skill \
         ORDER BY count DESC, skill ASC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Language frequency across processed profiles, most common first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn language_distribution(pool: &PgPool) -> Result<Vec<LabelCountRow>, DbError> {
    let rows = sqlx::query_as::<_, LabelCountRow>(
        "SELECT language AS label, COUNT(*) AS count \
         FROM profiles, unnest(languages) AS language \
         WHERE processed = true \
         GROUP BY language \
         ORDER BY count DESC, language ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// `experience_years` of every processed profile.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_processed_experience_years(pool: &PgPool) -> Result<Vec<i32>, DbError> {
    let years = sqlx::query_scalar::<_, i32>(
        "SELECT experience_years FROM profiles WHERE processed = true ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(years)
}

/// Top `limit` people by completion score.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn top_people_by_completion(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<TopPersonRow>, DbError> {
    let rows = sqlx::query_as::<_, TopPersonRow>(
        "SELECT display_name, username, completion, verified \
         FROM people \
         ORDER BY completion DESC, id ASC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Totals for people and profiles in a single round trip.
///
/// `avg_completion` is `NULL` when there are no people.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn quality_counts(pool: &PgPool) -> Result<QualityCountsRow, DbError> {
    let row = sqlx::query_as::<_, QualityCountsRow>(
        "SELECT \
             (SELECT COUNT(*) FROM people) AS total_people, \
             (SELECT COUNT(*) FROM profiles) AS total_profiles, \
             (SELECT COUNT(*) FROM people WHERE verified) AS verified_people, \
             (SELECT COUNT(*) FROM profiles WHERE processed) AS processed_profiles, \
             (SELECT AVG(completion) FROM people) AS avg_completion",
    )
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// People grouped by the search query that discovered them, largest groups
/// first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn search_query_stats(pool: &PgPool, limit: i64) -> Result<Vec<QueryStatRow>, DbError> {
    let rows = sqlx::query_as::<_, QueryStatRow>(
        "SELECT search_query, \
                COUNT(*) AS count, \
                AVG(completion) AS avg_completion, \
                COUNT(*) FILTER (WHERE verified) AS verified_count \
         FROM people \
         WHERE search_query IS NOT NULL \
         GROUP BY search_query \
         ORDER BY count DESC, search_query ASC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
