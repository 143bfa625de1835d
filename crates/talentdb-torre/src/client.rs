//! HTTP client for the Torre API.
//!
//! Wraps `reqwest` with Torre-specific URL building, status mapping, and
//! parsing of the newline-delimited search stream.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::error::TorreError;
use crate::stream::parse_search_stream;
use crate::types::{CandidateRecord, SearchPeopleRequest};

const DEFAULT_BASE_URL: &str = "https://torre.ai/api/";
const DEFAULT_USER_AGENT: &str = "talentdb/0.1 (profile-collection)";

/// Client for the Torre search and genome endpoints.
///
/// Use [`TorreClient::new`] for production or [`TorreClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct TorreClient {
    client: Client,
    base_url: Url,
}

impl TorreClient {
    /// Creates a client pointed at the production Torre API.
    ///
    /// # Errors
    ///
    /// Returns [`TorreError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, TorreError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, DEFAULT_USER_AGENT)
    }

    /// Creates a client with a custom base URL and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`TorreError::Transport`] if the `reqwest::Client` cannot be
    /// built, or [`TorreError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute hierarchical URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, TorreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so appended segments extend the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised)
            .map_err(|e| TorreError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(TorreError::InvalidBaseUrl(format!(
                "'{base_url}' cannot carry a path"
            )));
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Searches people matching `query`, returning at most what the stream
    /// yields for `limit`.
    ///
    /// Lines of the stream that fail to parse are skipped.
    ///
    /// # Errors
    ///
    /// - [`TorreError::Status`] on a non-2xx response.
    /// - [`TorreError::Transport`] on network failure.
    pub async fn search_people(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CandidateRecord>, TorreError> {
        let url = self.endpoint(&["entities", "_searchStream"])?;
        let response = self
            .client
            .post(url.clone())
            .json(&SearchPeopleRequest::people(query, limit))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TorreError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let records = parse_search_stream(&body);
        tracing::debug!(query, limit, found = records.len(), "torre search complete");
        Ok(records)
    }

    /// Searches with double the limit, keeps verified people, and truncates
    /// to `limit`. Does not search again when fewer are found.
    ///
    /// # Errors
    ///
    /// Same as [`TorreClient::search_people`].
    pub async fn search_verified_people(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CandidateRecord>, TorreError> {
        let people = self
            .search_people(query, limit.saturating_mul(2))
            .await?;
        Ok(people
            .into_iter()
            .filter(|p| p.verified)
            .take(limit as usize)
            .collect())
    }

    /// Fetches the full profile document for `username`.
    ///
    /// # Errors
    ///
    /// - [`TorreError::NotFound`] on HTTP 404.
    /// - [`TorreError::Status`] on any other non-2xx response.
    /// - [`TorreError::Transport`] on network failure.
    /// - [`TorreError::Deserialize`] if the body is not JSON.
    pub async fn get_profile(&self, username: &str) -> Result<Value, TorreError> {
        let url = self.endpoint(&["genome", "bios", username])?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TorreError::NotFound {
                username: username.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(TorreError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TorreError::Deserialize {
            context: format!("genome/bios/{username}"),
            source: e,
        })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TorreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TorreError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
