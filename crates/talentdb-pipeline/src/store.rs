//! Storage seam for the collection and enrichment loops.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use talentdb_core::DerivedProfile;
use talentdb_db::{DbError, NewPerson, PendingPersonRow, UnprocessedProfileRow};

/// The repository operations the pipeline needs.
///
/// Insert methods return `Ok(false)` when a uniqueness conflict suppressed
/// the write.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn insert_person(&self, person: &NewPerson<'_>) -> Result<bool, DbError>;

    async fn profile_exists(&self, username: &str) -> Result<bool, DbError>;

    async fn insert_profile(&self, username: &str, raw_payload: &Value) -> Result<bool, DbError>;

    async fn list_pending_people(&self) -> Result<Vec<PendingPersonRow>, DbError>;

    async fn count_people(&self) -> Result<i64, DbError>;

    async fn count_profiles(&self) -> Result<i64, DbError>;

    async fn list_unprocessed_profiles(&self) -> Result<Vec<UnprocessedProfileRow>, DbError>;

    async fn mark_profile_processed(
        &self,
        id: i64,
        derived: &DerivedProfile,
    ) -> Result<bool, DbError>;
}

/// [`CollectionStore`] backed by the Postgres repositories.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore for PgStore {
    async fn insert_person(&self, person: &NewPerson<'_>) -> Result<bool, DbError> {
        talentdb_db::insert_person(&self.pool, person).await
    }

    async fn profile_exists(&self, username: &str) -> Result<bool, DbError> {
        talentdb_db::profile_exists(&self.pool, username).await
    }

    async fn insert_profile(&self, username: &str, raw_payload: &Value) -> Result<bool, DbError> {
        talentdb_db::insert_profile(&self.pool, username, raw_payload).await
    }

    async fn list_pending_people(&self) -> Result<Vec<PendingPersonRow>, DbError> {
        talentdb_db::list_pending_people(&self.pool).await
    }

    async fn count_people(&self) -> Result<i64, DbError> {
        talentdb_db::count_people(&self.pool).await
    }

    async fn count_profiles(&self) -> Result<i64, DbError> {
        talentdb_db::count_profiles(&self.pool).await
    }

    async fn list_unprocessed_profiles(&self) -> Result<Vec<UnprocessedProfileRow>, DbError> {
        talentdb_db::list_unprocessed_profiles(&self.pool).await
    }

    async fn mark_profile_processed(
        &self,
        id: i64,
        derived: &DerivedProfile,
    ) -> Result<bool, DbError> {
        talentdb_db::mark_profile_processed(
            &self.pool,
            id,
            &derived.skills,
            &derived.languages,
            derived.experience_years,
        )
        .await
    }
}
