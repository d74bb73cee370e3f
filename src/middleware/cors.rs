use axum::http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

use super::auth::{ADMIN_TOKEN_HEADER, API_KEY_HEADER, CLIENT_ID_HEADER};

/// Any origin may call the API with the client and admin auth headers.
pub fn api_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(CLIENT_ID_HEADER),
            HeaderName::from_static(API_KEY_HEADER),
            HeaderName::from_static(ADMIN_TOKEN_HEADER),
        ])
}
