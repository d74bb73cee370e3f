use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};

use crate::{
    dto::{
        analytics_dto::{MetricSeriesResponse, TimeOfDayQuery, TimeOfDayResponse},
        cogspeed_dto::{CogspeedTestResultPayload, CogspeedTestResultResponse},
    },
    error::{Error, Result},
    middleware::auth::AuthenticatedClient,
    models::{analytics::ResultMetric, cogspeed::TestResultSummary},
    AppState,
};

#[utoipa::path(
    post,
    path = "/clients/cogspeed/tests",
    request_body = CogspeedTestResultPayload,
    params(
        ("X-Client-ID" = String, Header, description = "Client identifier"),
        ("X-Api-Key" = String, Header, description = "Client API key"),
    ),
    responses(
        (status = 201, description = "Test result stored", body = i32),
        (status = 400, description = "Header and body client IDs differ, or malformed JSON"),
        (status = 422, description = "Body is missing fields or has the wrong types"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 409, description = "Test result already submitted"),
    ),
)]
pub async fn submit_test(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedClient>,
    payload: std::result::Result<Json<CogspeedTestResultPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<u16>)> {
    let Json(payload) = payload?;
    state
        .cogspeed_service
        .submit(&auth.client_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(StatusCode::CREATED.as_u16())))
}

#[utoipa::path(
    get,
    path = "/clients/cogspeed/tests",
    responses(
        (status = 200, description = "Caller's test results, newest first", body = Vec<TestResultSummary>),
        (status = 401, description = "Missing or invalid credentials"),
    ),
)]
pub async fn list_tests(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedClient>,
) -> Result<Json<Vec<TestResultSummary>>> {
    let results = state.cogspeed_service.list_results(&auth.client_id).await?;
    Ok(Json(results))
}

#[utoipa::path(
    get,
    path = "/clients/cogspeed/tests/{test_id}",
    params(("test_id" = String, Path, description = "Test session id")),
    responses(
        (status = 200, description = "Stored result with rounds", body = CogspeedTestResultResponse),
        (status = 404, description = "No such result for this client"),
    ),
)]
pub async fn get_test(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedClient>,
    test_id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<CogspeedTestResultResponse>> {
    let Path(test_id) = test_id?;
    state
        .cogspeed_service
        .get_result(&auth.client_id, &test_id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::NotFound("Test result not found".into()))
}

#[utoipa::path(
    get,
    path = "/clients/cogspeed/metrics/{metric}",
    params(("metric" = ResultMetric, Path, description = "Allow-listed metric")),
    responses(
        (status = 200, description = "Metric values over time", body = MetricSeriesResponse),
        (status = 400, description = "Unknown metric"),
    ),
)]
pub async fn metric_series(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedClient>,
    metric: std::result::Result<Path<ResultMetric>, PathRejection>,
) -> Result<Json<MetricSeriesResponse>> {
    let Path(metric) = metric?;
    let series = state
        .analytics_service
        .metric_series(&auth.client_id, metric)
        .await?;
    Ok(Json(series))
}

#[utoipa::path(
    get,
    path = "/clients/cogspeed/time-of-day",
    params(TimeOfDayQuery),
    responses(
        (status = 200, description = "Morning vs evening comparison", body = TimeOfDayResponse),
        (status = 400, description = "Unknown metric"),
    ),
)]
pub async fn time_of_day(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedClient>,
    query: std::result::Result<Query<TimeOfDayQuery>, QueryRejection>,
) -> Result<Json<TimeOfDayResponse>> {
    let Query(query) = query?;
    let comparison = state
        .analytics_service
        .time_of_day(&auth.client_id, query.metric.unwrap_or_default())
        .await?;
    Ok(Json(comparison))
}
