//! Collection, enrichment, and analysis over the talent corpus.

pub mod analysis;
pub mod collect;
pub mod enrich;
pub mod error;
pub mod pacing;
pub mod source;
pub mod store;

#[cfg(test)]
mod testing;

pub use analysis::{Analyzer, Insights};
pub use collect::{
    CollectPendingSummary, CollectPeopleSummary, CollectProfilesSummary, Collector,
    DEFAULT_PEOPLE_LIMIT, MAX_PEOPLE_LIMIT,
};
pub use enrich::{process_profiles, process_profiles_at, ProcessProfilesSummary};
pub use error::PipelineError;
pub use pacing::{Pacer, PacingPolicy, TokioPacer};
pub use source::ProfileSource;
pub use store::{CollectionStore, PgStore};
