use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    error::{Error, Result},
    services::client_service::ClientService,
    utils::crypto::secrets_match,
    AppState,
};

pub const CLIENT_ID_HEADER: &str = "x-client-id";
pub const API_KEY_HEADER: &str = "x-api-key";
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

const MISSING_CREDENTIALS: &str = "Missing X-API-Key or X-Client-ID header";
const INVALID_CREDENTIALS: &str = "Invalid Client ID or API Key";

/// Identity established by header authentication, available to handlers as
/// a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedClient {
    pub client_id: String,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub async fn authenticate_headers(
    clients: &ClientService,
    headers: &HeaderMap,
) -> Result<AuthenticatedClient> {
    let (Some(client_id), Some(api_key)) = (
        header_str(headers, CLIENT_ID_HEADER),
        header_str(headers, API_KEY_HEADER),
    ) else {
        return Err(Error::Unauthorized(MISSING_CREDENTIALS.into()));
    };

    match clients.find_by_id_and_key(client_id, api_key).await? {
        Some(client) => Ok(AuthenticatedClient {
            client_id: client.client_id,
        }),
        None => {
            tracing::warn!(client_id = %client_id, "rejected api key authentication");
            Err(Error::Unauthorized(INVALID_CREDENTIALS.into()))
        }
    }
}

pub async fn require_client_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match authenticate_headers(&state.client_service, req.headers()).await {
        Ok(client) => {
            req.extensions_mut().insert(client);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}

pub fn verify_admin_token(expected: Option<&str>, headers: &HeaderMap) -> Result<()> {
    let Some(expected) = expected else {
        return Err(Error::Unauthorized("Admin access is not configured".into()));
    };
    let Some(provided) = header_str(headers, ADMIN_TOKEN_HEADER) else {
        return Err(Error::Unauthorized("Missing X-Admin-Token header".into()));
    };
    if secrets_match(provided, expected) {
        Ok(())
    } else {
        tracing::warn!("rejected admin token");
        Err(Error::Unauthorized("Invalid admin token".into()))
    }
}

pub async fn require_admin_token(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match verify_admin_token(state.admin_token.as_deref(), req.headers()) {
        Ok(()) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}
