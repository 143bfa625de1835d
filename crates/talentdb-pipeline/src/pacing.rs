//! Inter-request pacing for the collection loops.
//!
//! Loops call [`Pacer::pause`] after each successful external fetch. The
//! production pacer sleeps; tests substitute one that records the requested
//! delays.

use std::time::Duration;

use async_trait::async_trait;
use talentdb_core::AppConfig;

/// Suspends the current task between external calls.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Delays applied after each successful profile fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Ad-hoc username batches.
    pub collect_profiles: Duration,
    /// The pending-profile sweep.
    pub pending_profiles: Duration,
    /// Read-only bulk fetches.
    pub bulk_profiles: Duration,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            collect_profiles: Duration::from_millis(3000),
            pending_profiles: Duration::from_millis(1000),
            bulk_profiles: Duration::from_millis(1000),
        }
    }
}

impl PacingPolicy {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            collect_profiles: Duration::from_millis(config.collect_profiles_delay_ms),
            pending_profiles: Duration::from_millis(config.pending_profiles_delay_ms),
            bulk_profiles: Duration::from_millis(config.bulk_profiles_delay_ms),
        }
    }
}
