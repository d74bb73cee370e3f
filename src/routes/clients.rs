use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};

use crate::{
    dto::client_dto::{LoginRequest, LoginResponse, SignupRequest},
    error::Result,
    middleware::auth::AuthenticatedClient,
    utils::validation::validate,
    AppState,
};

const LOGIN_FAILED: &str = "Client does not exist";
const CLIENT_NOT_FOUND: &str = "Client not found";

#[utoipa::path(
    post,
    path = "/clients/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Client registered", body = LoginResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Invalid profile"),
    ),
)]
pub async fn signup(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LoginResponse>)> {
    let Json(payload) = payload?;
    validate(&payload)?;
    let (profile, password) = payload.into_parts();
    let client = state.client_service.create(profile, &password).await?;
    Ok((StatusCode::CREATED, Json(LoginResponse::ok(client))))
}

/// Unknown email and wrong password produce the same answer.
#[utoipa::path(
    post,
    path = "/clients/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login outcome; check `success`", body = LoginResponse),
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(payload) = payload?;
    validate(&payload)?;
    let Some(client) = state
        .client_service
        .verify_credentials(&payload.email, &payload.password)
        .await?
    else {
        return Ok(Json(LoginResponse::failure(LOGIN_FAILED)));
    };

    let client = state.client_service.record_login(&client.client_id).await?;
    Ok(Json(LoginResponse::ok(client)))
}

#[utoipa::path(
    get,
    path = "/clients/fetch",
    params(
        ("X-Client-ID" = String, Header, description = "Client identifier"),
        ("X-Api-Key" = String, Header, description = "Client API key"),
    ),
    responses(
        (status = 200, description = "Authenticated client", body = LoginResponse),
        (status = 401, description = "Missing or invalid credentials"),
    ),
)]
pub async fn fetch(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedClient>,
) -> Result<Json<LoginResponse>> {
    let response = match state.client_service.find_by_id(&auth.client_id).await? {
        Some(client) => LoginResponse::ok(client),
        None => LoginResponse::failure(CLIENT_NOT_FOUND),
    };
    Ok(Json(response))
}
