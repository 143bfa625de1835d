//! Search-and-persist loops for people and profiles.
//!
//! Every loop is sequential, one external call at a time. A single item's
//! failure is logged with its error kind and folded into the `errors`
//! counter; only input validation and failures outside the per-item loop
//! (the search call, listing pending rows) abort an operation.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use talentdb_core::PendingProfilesStatus;
use talentdb_db::NewPerson;

use crate::error::PipelineError;
use crate::pacing::{Pacer, PacingPolicy, TokioPacer};
use crate::source::ProfileSource;
use crate::store::CollectionStore;

pub const DEFAULT_PEOPLE_LIMIT: u32 = 20;
pub const MAX_PEOPLE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectPeopleSummary {
    pub found: usize,
    pub saved: usize,
    pub duplicates: usize,
    pub errors: usize,
}

/// Invariant: `saved + duplicates + errors == requested`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectProfilesSummary {
    pub requested: usize,
    pub saved: usize,
    pub duplicates: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectPendingSummary {
    pub pending: usize,
    pub saved: usize,
    pub errors: usize,
}

/// Result of fetching and storing one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreOutcome {
    Saved,
    /// The insert was suppressed because the username already has a row.
    Suppressed,
}

/// Runs the collection operations against a source and a store.
pub struct Collector<S, T, P = TokioPacer> {
    source: S,
    store: T,
    pacer: P,
    pacing: PacingPolicy,
}

impl<S, T, P> Collector<S, T, P>
where
    S: ProfileSource,
    T: CollectionStore,
    P: Pacer,
{
    pub fn new(source: S, store: T, pacer: P, pacing: PacingPolicy) -> Self {
        Self {
            source,
            store,
            pacer,
            pacing,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    /// Searches `query` and stores every candidate not already known.
    ///
    /// `limit` defaults to [`DEFAULT_PEOPLE_LIMIT`]. Candidates whose
    /// `external_id` is already stored count as duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidInput`] for a blank query or a limit
    /// outside `1..=100`, and [`PipelineError::Source`] if the search itself
    /// fails. Per-candidate failures are counted, not returned.
    pub async fn collect_people(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> Result<CollectPeopleSummary, PipelineError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PipelineError::InvalidInput(
                "query must be a non-empty string".to_string(),
            ));
        }
        let limit = limit.unwrap_or(DEFAULT_PEOPLE_LIMIT);
        if !(1..=MAX_PEOPLE_LIMIT).contains(&limit) {
            return Err(PipelineError::InvalidInput(format!(
                "limit must be between 1 and {MAX_PEOPLE_LIMIT}, got {limit}"
            )));
        }

        let candidates = self.source.search_people(query, limit).await?;
        let mut summary = CollectPeopleSummary {
            found: candidates.len(),
            ..CollectPeopleSummary::default()
        };

        for candidate in &candidates {
            let person = NewPerson {
                external_id: candidate.external_id,
                source_graph_id: &candidate.source_graph_id,
                display_name: &candidate.name,
                username: &candidate.username,
                headline: &candidate.headline,
                image_url: candidate.image_url.as_deref(),
                completion: candidate.completion,
                verified: candidate.verified,
                rank: candidate.rank,
                search_query: Some(query),
                collected_at: Utc::now(),
            };

            match self.store.insert_person(&person).await {
                Ok(true) => summary.saved += 1,
                Ok(false) => summary.duplicates += 1,
                Err(e) => {
                    let e = PipelineError::from(e);
                    tracing::warn!(
                        external_id = candidate.external_id,
                        username = %candidate.username,
                        kind = e.kind(),
                        error = %e,
                        "failed to store person"
                    );
                    summary.errors += 1;
                }
            }
        }

        tracing::info!(
            query,
            found = summary.found,
            saved = summary.saved,
            duplicates = summary.duplicates,
            errors = summary.errors,
            "people collection complete"
        );
        Ok(summary)
    }

    /// Fetches and stores the profile for each username.
    ///
    /// Usernames that already have a profile are counted as duplicates and
    /// are neither fetched nor paced. The collect-profiles delay follows each
    /// successful save.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidInput`] if any username is blank.
    pub async fn collect_profiles(
        &self,
        usernames: &[String],
    ) -> Result<CollectProfilesSummary, PipelineError> {
        if let Some(index) = usernames.iter().position(|u| u.trim().is_empty()) {
            return Err(PipelineError::InvalidInput(format!(
                "usernames[{index}] must be a non-empty string"
            )));
        }

        let mut summary = CollectProfilesSummary {
            requested: usernames.len(),
            ..CollectProfilesSummary::default()
        };

        for username in usernames {
            let username = username.trim();
            match self.collect_one_profile(username).await {
                Ok(Some(StoreOutcome::Saved)) => {
                    summary.saved += 1;
                    self.pacer.pause(self.pacing.collect_profiles).await;
                }
                Ok(Some(StoreOutcome::Suppressed) | None) => {
                    tracing::debug!(username, "profile already collected");
                    summary.duplicates += 1;
                }
                Err(e) => {
                    tracing::warn!(username, kind = e.kind(), error = %e, "profile collection failed");
                    summary.errors += 1;
                }
            }
        }

        tracing::info!(
            requested = summary.requested,
            saved = summary.saved,
            duplicates = summary.duplicates,
            errors = summary.errors,
            "profile collection complete"
        );
        Ok(summary)
    }

    /// Fetches profiles for every stored person that has none yet.
    ///
    /// The pending-profiles delay follows each successful save. An insert
    /// suppressed by a concurrent writer counts as an error here.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Storage`] if the pending set cannot be read.
    pub async fn collect_pending_profiles(&self) -> Result<CollectPendingSummary, PipelineError> {
        let pending = self.store.list_pending_people().await?;
        let mut summary = CollectPendingSummary {
            pending: pending.len(),
            ..CollectPendingSummary::default()
        };

        if pending.is_empty() {
            tracing::info!("all profiles have already been collected");
            return Ok(summary);
        }

        tracing::info!(pending = summary.pending, "collecting pending profiles");

        for person in &pending {
            match self.fetch_and_store(&person.username).await {
                Ok(StoreOutcome::Saved) => {
                    summary.saved += 1;
                    self.pacer.pause(self.pacing.pending_profiles).await;
                }
                Ok(StoreOutcome::Suppressed) => {
                    tracing::warn!(
                        username = %person.username,
                        kind = "storage_conflict",
                        "profile appeared during pending sweep"
                    );
                    summary.errors += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        username = %person.username,
                        kind = e.kind(),
                        error = %e,
                        "pending profile collection failed"
                    );
                    summary.errors += 1;
                }
            }
        }

        tracing::info!(
            pending = summary.pending,
            saved = summary.saved,
            errors = summary.errors,
            "pending profile collection complete"
        );
        Ok(summary)
    }

    /// Fetches raw profile documents without storing them.
    ///
    /// Usernames are fetched in order with the bulk delay after each success.
    /// Failed fetches are logged and left out of the result.
    pub async fn fetch_profiles(&self, usernames: &[String]) -> Vec<Value> {
        let mut profiles = Vec::with_capacity(usernames.len());

        for username in usernames {
            match self.source.get_profile(username).await {
                Ok(profile) => {
                    profiles.push(profile);
                    self.pacer.pause(self.pacing.bulk_profiles).await;
                }
                Err(e) => {
                    tracing::warn!(
                        username = %username,
                        error = %e,
                        "profile fetch failed; skipping"
                    );
                }
            }
        }

        profiles
    }

    /// Counts people and profiles.
    ///
    /// `pending_profiles` is the raw `profiles - people` difference; see
    /// [`PendingProfilesStatus`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Storage`] if either count fails.
    pub async fn pending_profiles_status(&self) -> Result<PendingProfilesStatus, PipelineError> {
        let total_people = self.store.count_people().await?;
        let total_profiles = self.store.count_profiles().await?;
        Ok(PendingProfilesStatus::from_counts(
            total_people,
            total_profiles,
        ))
    }

    /// `Ok(None)` when the username already has a stored profile.
    async fn collect_one_profile(
        &self,
        username: &str,
    ) -> Result<Option<StoreOutcome>, PipelineError> {
        if self.store.profile_exists(username).await? {
            return Ok(None);
        }
        self.fetch_and_store(username).await.map(Some)
    }

    async fn fetch_and_store(&self, username: &str) -> Result<StoreOutcome, PipelineError> {
        let raw = self.source.get_profile(username).await?;
        if self.store.insert_profile(username, &raw).await? {
            Ok(StoreOutcome::Saved)
        } else {
            Ok(StoreOutcome::Suppressed)
        }
    }
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
