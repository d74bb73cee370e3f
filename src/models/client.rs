use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub client_id: String,
    pub email: String,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub country: String,
    pub education_level: Option<String>,
    pub occupation: Option<String>,
    pub handedness: Option<String>,
    pub notes: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub api_key: String,
    pub last_login: Option<DateTime<Utc>>,
    pub login_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Profile attributes supplied at signup.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub email: String,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub country: String,
    pub education_level: Option<String>,
    pub occupation: Option<String>,
    pub handedness: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct ClientSummary {
    pub client_id: String,
    pub full_name: String,
}
