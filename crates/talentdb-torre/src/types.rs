//! Torre API request and response types.

use serde::{Deserialize, Serialize};

const PROFILE_BASE_URL: &str = "https://torre.ai";

/// Body of `POST entities/_searchStream`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPeopleRequest<'a> {
    pub query: &'a str,
    pub identity_type: &'static str,
    pub limit: u32,
    pub meta: bool,
    pub exclude_contacts: bool,
}

impl<'a> SearchPeopleRequest<'a> {
    #[must_use]
    pub fn people(query: &'a str, limit: u32) -> Self {
        Self {
            query,
            identity_type: "person",
            limit,
            meta: true,
            exclude_contacts: true,
        }
    }
}

/// One line of the search stream.
///
/// Only the fields the pipeline stores are modelled; everything else in the
/// line is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(rename = "ardaId")]
    pub external_id: i64,
    #[serde(rename = "ggId", default)]
    pub source_graph_id: String,
    pub name: String,
    pub username: String,
    #[serde(rename = "professionalHeadline", default)]
    pub headline: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub completion: f64,
    #[serde(default)]
    pub verified: bool,
    #[serde(rename = "pageRank", default)]
    pub rank: f64,
}

impl CandidateRecord {
    /// Public profile page for this person.
    #[must_use]
    pub fn profile_url(&self) -> String {
        format!("{PROFILE_BASE_URL}/{}", self.username)
    }

    /// `completion` as a rounded 0–100 percentage.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn completion_percentage(&self) -> i64 {
        (self.completion * 100.0).round() as i64
    }
}
