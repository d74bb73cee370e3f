use axum::Json;
use utoipa::OpenApi;

use crate::{
    dto::{analytics_dto, client_dto, cogspeed_dto},
    models::{analytics, client, cogspeed},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Cogspeed client API"),
    paths(
        super::clients::signup,
        super::clients::login,
        super::clients::fetch,
        super::cogspeed::submit_test,
        super::cogspeed::list_tests,
        super::cogspeed::get_test,
        super::cogspeed::metric_series,
        super::cogspeed::time_of_day,
        super::analytics::demographics,
        super::analytics::list_clients,
    ),
    components(schemas(
        client_dto::SignupRequest,
        client_dto::LoginRequest,
        client_dto::ClientResponse,
        client_dto::LoginResponse,
        cogspeed_dto::CogspeedTestRoundPayload,
        cogspeed_dto::CogspeedTestResultPayload,
        cogspeed_dto::CogspeedTestResultResponse,
        cogspeed::TestResultSummary,
        client::ClientSummary,
        analytics::DemographicKey,
        analytics::ResultMetric,
        analytics_dto::HistogramBucket,
        analytics_dto::DemographicsResponse,
        analytics_dto::MetricPoint,
        analytics_dto::MetricSeriesResponse,
        analytics_dto::WindowSummary,
        analytics_dto::TimeOfDayWindow,
        analytics_dto::TimeOfDayResponse,
    )),
    tags((name = "cogspeed", description = "Client registry and test-result ingestion"))
)]
pub struct ApiDoc;

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
