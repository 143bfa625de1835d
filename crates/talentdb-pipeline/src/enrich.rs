//! Enrichment of stored profiles into normalized analytical fields.

use chrono::{Datelike, Utc};
use serde::Serialize;
use talentdb_core::derive_profile;

use crate::error::PipelineError;
use crate::store::CollectionStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessProfilesSummary {
    pub found: usize,
    pub processed: usize,
    pub errors: usize,
}

/// Derives fields for every unprocessed profile using the current year.
///
/// # Errors
///
/// Returns [`PipelineError::Storage`] if the unprocessed set cannot be read.
pub async fn process_profiles<T>(store: &T) -> Result<ProcessProfilesSummary, PipelineError>
where
    T: CollectionStore,
{
    process_profiles_at(store, Utc::now().year()).await
}

/// Same as [`process_profiles`] with an explicit `current_year` for open-ended
/// experiences.
///
/// A row already flipped by an overlapping run is skipped without counting.
///
/// # Errors
///
/// Returns [`PipelineError::Storage`] if the unprocessed set cannot be read.
pub async fn process_profiles_at<T>(
    store: &T,
    current_year: i32,
) -> Result<ProcessProfilesSummary, PipelineError>
where
    T: CollectionStore,
{
    let rows = store.list_unprocessed_profiles().await?;
    let mut summary = ProcessProfilesSummary {
        found: rows.len(),
        ..ProcessProfilesSummary::default()
    };

    for row in &rows {
        let result = async {
            let derived = derive_profile(&row.raw_payload, current_year)?;
            let updated = store.mark_profile_processed(row.id, &derived).await?;
            Ok::<_, PipelineError>(updated)
        }
        .await;

        match result {
            Ok(true) => summary.processed += 1,
            Ok(false) => {
                tracing::debug!(username = %row.username, "profile already processed");
            }
            Err(e) => {
                tracing::warn!(
                    username = %row.username,
                    profile_id = row.id,
                    kind = e.kind(),
                    error = %e,
                    "profile enrichment failed"
                );
                summary.errors += 1;
            }
        }
    }

    tracing::info!(
        found = summary.found,
        processed = summary.processed,
        errors = summary.errors,
        "profile enrichment complete"
    );
    Ok(summary)
}
