use crate::models::client::{Client, NewClient};
use crate::utils::validation::deserialize_normalized_email;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[serde(deserialize_with = "deserialize_normalized_email")]
    #[validate(email)]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    #[validate(length(min = 1))]
    #[schema(example = "Female")]
    pub gender: String,
    #[validate(length(min = 1))]
    #[schema(example = "Canada")]
    pub country: String,
    #[schema(example = "Bachelor's Degree")]
    pub education_level: Option<String>,
    #[schema(example = "Software Developer")]
    pub occupation: Option<String>,
    #[schema(example = "Right")]
    pub handedness: Option<String>,
    pub notes: Option<String>,
    #[validate(length(min = 1))]
    pub password: String,
}

impl SignupRequest {
    /// Splits the request into the stored profile and the plaintext password.
    pub fn into_parts(self) -> (NewClient, String) {
        let profile = NewClient {
            email: self.email,
            full_name: self.full_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            country: self.country,
            education_level: self.education_level,
            occupation: self.occupation,
            handedness: self.handedness,
            notes: self.notes,
        };
        (profile, self.password)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(deserialize_with = "deserialize_normalized_email")]
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Client as returned to its owner. Never carries the password digest.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientResponse {
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
    /// The client API key used to make requests to our servers.
    pub api_key: String,
    pub last_login: Option<DateTime<Utc>>,
    pub login_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Client> for ClientResponse {
    fn from(c: Client) -> Self {
        Self {
            client_id: c.client_id,
            email: c.email,
            full_name: c.full_name,
            date_of_birth: c.date_of_birth,
            gender: c.gender,
            country: c.country,
            education_level: c.education_level,
            occupation: c.occupation,
            handedness: c.handedness,
            notes: c.notes,
            api_key: c.api_key,
            last_login: c.last_login,
            login_count: c.login_count,
            created_at: c.created_at,
        }
    }
}

/// Envelope shared by signup, login and fetch: exactly one of `error` and
/// `client` is set.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub error: Option<String>,
    pub client: Option<ClientResponse>,
}

impl LoginResponse {
    pub fn ok(client: Client) -> Self {
        Self {
            success: true,
            error: None,
            client: Some(client.into()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            client: None,
        }
    }
}
