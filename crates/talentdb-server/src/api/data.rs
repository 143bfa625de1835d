use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use talentdb_core::{DataQualityMetrics, PendingProfilesStatus};
use talentdb_pipeline::{
    process_profiles as run_process_profiles, CollectPendingSummary, CollectPeopleSummary,
    CollectProfilesSummary, Insights, ProcessProfilesSummary,
};

use crate::middleware::RequestId;

use super::{
    map_json_rejection, map_pipeline_error, ActionResponse, ApiError, ApiResponse, AppState,
};

#[derive(Debug, Deserialize)]
pub(super) struct CollectPeopleRequest {
    query: Option<String>,
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CollectProfilesRequest {
    usernames: Option<Vec<String>>,
}

pub(super) async fn collect_people(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<CollectPeopleRequest>, JsonRejection>,
) -> Result<Json<ActionResponse<CollectPeopleSummary>>, ApiError> {
    let Json(body) = body.map_err(|e| map_json_rejection(req_id.0.clone(), &e))?;
    let query = body.query.unwrap_or_default();

    let summary = state
        .collector
        .collect_people(&query, body.limit)
        .await
        .map_err(|e| map_pipeline_error(req_id.0.clone(), &e))?;

    Ok(Json(
        ActionResponse::new(req_id.0, "Collecting people finished.", summary)
            .with_query(query.trim()),
    ))
}

pub(super) async fn collect_profiles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<CollectProfilesRequest>, JsonRejection>,
) -> Result<Json<ActionResponse<CollectProfilesSummary>>, ApiError> {
    let Json(body) = body.map_err(|e| map_json_rejection(req_id.0.clone(), &e))?;
    let usernames = body.usernames.ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            "validation_error",
            "usernames is mandatory and must be an array of strings",
        )
    })?;

    let summary = state
        .collector
        .collect_profiles(&usernames)
        .await
        .map_err(|e| map_pipeline_error(req_id.0.clone(), &e))?;

    Ok(Json(ActionResponse::new(
        req_id.0,
        "Collecting profiles finished.",
        summary,
    )))
}

pub(super) async fn collect_pending_profiles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ActionResponse<CollectPendingSummary>>, ApiError> {
    let summary = state
        .collector
        .collect_pending_profiles()
        .await
        .map_err(|e| map_pipeline_error(req_id.0.clone(), &e))?;

    let message = if summary.pending == 0 {
        "All profiles have already been collected."
    } else {
        "Pending profiles collection finished."
    };
    Ok(Json(ActionResponse::new(req_id.0, message, summary)))
}

pub(super) async fn pending_profiles_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<PendingProfilesStatus>>, ApiError> {
    let status = state
        .collector
        .pending_profiles_status()
        .await
        .map_err(|e| map_pipeline_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(req_id.0, status)))
}

pub(super) async fn process_profiles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ActionResponse<ProcessProfilesSummary>>, ApiError> {
    let summary = run_process_profiles(state.collector.store())
        .await
        .map_err(|e| map_pipeline_error(req_id.0.clone(), &e))?;

    Ok(Json(ActionResponse::new(
        req_id.0,
        "Finished profile processing.",
        summary,
    )))
}

pub(super) async fn insights(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Insights>> {
    Json(ApiResponse::new(req_id.0, state.analyzer.insights().await))
}

pub(super) async fn stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<DataQualityMetrics>> {
    Json(ApiResponse::new(
        req_id.0,
        state.analyzer.data_quality_metrics().await,
    ))
}
