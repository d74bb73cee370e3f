pub mod analytics;
pub mod clients;
pub mod cogspeed;
pub mod docs;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{
        auth::{require_admin_token, require_client_auth},
        cors::api_cors,
    },
    AppState,
};

const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let base_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/openapi.json", get(docs::openapi))
        .route("/clients/signup", post(clients::signup))
        .route("/clients/login", post(clients::login));

    let client_api = Router::new()
        .route("/clients/fetch", get(clients::fetch))
        .route(
            "/clients/cogspeed/tests",
            get(cogspeed::list_tests).post(cogspeed::submit_test),
        )
        .route("/clients/cogspeed/tests/:test_id", get(cogspeed::get_test))
        .route(
            "/clients/cogspeed/metrics/:metric",
            get(cogspeed::metric_series),
        )
        .route("/clients/cogspeed/time-of-day", get(cogspeed::time_of_day))
        .layer(from_fn_with_state(state.clone(), require_client_auth));

    let admin_api = Router::new()
        .route("/admin/demographics/:key", get(analytics::demographics))
        .route("/admin/clients", get(analytics::list_clients))
        .layer(from_fn_with_state(state.clone(), require_admin_token));

    base_routes
        .merge(client_api)
        .merge(admin_api)
        .with_state(state)
        .layer(api_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
