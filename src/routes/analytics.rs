use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::{
    dto::analytics_dto::DemographicsResponse,
    error::Result,
    models::{analytics::DemographicKey, client::ClientSummary},
    AppState,
};

#[utoipa::path(
    get,
    path = "/admin/demographics/{key}",
    params(
        ("key" = DemographicKey, Path, description = "gender, country, handedness or age"),
        ("X-Admin-Token" = String, Header, description = "Dashboard admin token"),
    ),
    responses(
        (status = 200, description = "Client counts per value", body = DemographicsResponse),
        (status = 400, description = "Unknown key"),
        (status = 401, description = "Missing or invalid admin token"),
    ),
)]
pub async fn demographics(
    State(state): State<AppState>,
    key: std::result::Result<Path<DemographicKey>, PathRejection>,
) -> Result<Json<DemographicsResponse>> {
    let Path(key) = key?;
    let histogram = state.analytics_service.demographics(key).await?;
    Ok(Json(histogram))
}

#[utoipa::path(
    get,
    path = "/admin/clients",
    params(("X-Admin-Token" = String, Header, description = "Dashboard admin token")),
    responses(
        (status = 200, description = "All registered clients", body = Vec<ClientSummary>),
        (status = 401, description = "Missing or invalid admin token"),
    ),
)]
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<ClientSummary>>> {
    let clients = state.client_service.list_summaries().await?;
    Ok(Json(clients))
}
