use talentdb_core::CoreError;
use talentdb_db::DbError;
use talentdb_torre::TorreError;
use thiserror::Error;

/// Errors surfaced by pipeline operations.
///
/// Inside batch loops these are logged with [`PipelineError::kind`] and
/// counted; only [`PipelineError::InvalidInput`] and failures outside the
/// per-item loop reach the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Source(#[from] TorreError),

    #[error(transparent)]
    Storage(#[from] DbError),

    #[error(transparent)]
    Derive(#[from] CoreError),
}

impl PipelineError {
    /// Stable label used in structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::Source(TorreError::NotFound { .. }) => "not_found",
            Self::Source(TorreError::Deserialize { .. }) | Self::Derive(_) => "malformed_payload",
            Self::Source(_) => "source_unavailable",
            Self::Storage(DbError::Conflict { .. }) => "storage_conflict",
            Self::Storage(_) => "storage",
        }
    }
}
