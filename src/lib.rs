#![recursion_limit = "256"]

pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    analytics_service::AnalyticsService, client_service::ClientService,
    cogspeed_service::CogspeedService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub client_service: ClientService,
    pub cogspeed_service: CogspeedService,
    pub analytics_service: AnalyticsService,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(pool: PgPool, admin_token: Option<String>) -> Self {
        let client_service = ClientService::new(pool.clone());
        let cogspeed_service = CogspeedService::new(pool.clone());
        let analytics_service = AnalyticsService::new(pool.clone());

        Self {
            pool,
            client_service,
            cogspeed_service,
            analytics_service,
            admin_token,
        }
    }
}
