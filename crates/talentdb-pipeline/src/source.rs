use async_trait::async_trait;
use serde_json::Value;
use talentdb_torre::{CandidateRecord, TorreClient, TorreError};

/// The external system people and profiles are collected from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn search_people(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CandidateRecord>, TorreError>;

    async fn get_profile(&self, username: &str) -> Result<Value, TorreError>;
}

#[async_trait]
impl ProfileSource for TorreClient {
    async fn search_people(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CandidateRecord>, TorreError> {
        TorreClient::search_people(self, query, limit).await
    }

    async fn get_profile(&self, username: &str) -> Result<Value, TorreError> {
        TorreClient::get_profile(self, username).await
    }
}
