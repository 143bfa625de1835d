use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use talentdb_torre::CandidateRecord;

use crate::middleware::RequestId;

use super::{map_json_rejection, map_source_error, ApiError, ApiResponse, AppState};

const DEFAULT_SEARCH_LIMIT: u32 = 5;
const MAX_SEARCH_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    query: Option<String>,
    limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CandidateSummary {
    external_id: i64,
    name: String,
    username: String,
    headline: String,
    image_url: Option<String>,
    /// Rounded 0–100 percentage.
    completion: i64,
    verified: bool,
    profile_url: String,
}

impl From<CandidateRecord> for CandidateSummary {
    fn from(record: CandidateRecord) -> Self {
        Self {
            completion: record.completion_percentage(),
            profile_url: record.profile_url(),
            external_id: record.external_id,
            name: record.name,
            username: record.username,
            headline: record.headline,
            image_url: record.image_url,
            verified: record.verified,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ProfileData {
    username: String,
    profile: serde_json::Value,
}

/// Validates a search body, returning `(query, limit)`.
fn validate_search(req_id: &str, body: SearchRequest) -> Result<(String, u32), ApiError> {
    let query = body
        .query
        .map(|q| q.trim().to_owned())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            ApiError::new(
                req_id,
                "validation_error",
                "query is mandatory and must be a non-empty string",
            )
        })?;

    let limit = body.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            format!("limit must be between 1 and {MAX_SEARCH_LIMIT}"),
        ));
    }

    Ok((query, limit))
}

pub(super) async fn search_people(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<CandidateSummary>>>, ApiError> {
    let Json(body) = body.map_err(|e| map_json_rejection(req_id.0.clone(), &e))?;
    let (query, limit) = validate_search(&req_id.0, body)?;

    let people = state
        .collector
        .source()
        .search_people(&query, limit)
        .await
        .map_err(|e| map_source_error(req_id.0.clone(), &e))?;

    let data = people.into_iter().map(CandidateSummary::from).collect();
    Ok(Json(ApiResponse::new(req_id.0, data)))
}

pub(super) async fn search_verified_people(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<CandidateSummary>>>, ApiError> {
    let Json(body) = body.map_err(|e| map_json_rejection(req_id.0.clone(), &e))?;
    let (query, limit) = validate_search(&req_id.0, body)?;

    let people = state
        .collector
        .source()
        .search_verified_people(&query, limit)
        .await
        .map_err(|e| map_source_error(req_id.0.clone(), &e))?;

    let data = people.into_iter().map(CandidateSummary::from).collect();
    Ok(Json(ApiResponse::new(req_id.0, data)))
}

pub(super) async fn get_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<ProfileData>>, ApiError> {
    let profile = state
        .collector
        .source()
        .get_profile(&username)
        .await
        .map_err(|e| map_source_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(
        req_id.0,
        ProfileData { username, profile },
    )))
}
